//! HTTP chat backend implementation.

use async_trait::async_trait;
use tracing::debug;

use sidekick_config::ChatConfig;
use sidekick_protocols::{ChatBackend, ChatMessage, ChatReply, DeliveryError};

use crate::api::{ApiRequest, ApiResponse};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/chat_api/chat";

/// Talks to the chat service over `POST {endpoint}`.
pub struct HttpChatBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create backend with a preconfigured client (timeouts, proxies).
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, DeliveryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(Self::with_client(config.endpoint.clone(), client))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_request(&self, body: &ApiRequest<'_>) -> Result<reqwest::Response, DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(DeliveryError::HttpStatus { status, body: text });
        }

        Ok(response)
    }
}

impl Default for HttpChatBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    fn id(&self) -> &str {
        "http"
    }

    async fn send(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<ChatReply, DeliveryError> {
        let body = ApiRequest {
            message,
            conversation_history: history,
        };
        debug!(endpoint = %self.endpoint, history_len = history.len(), "Sending chat request");

        let response = self.send_request(&body).await?;
        let text = response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        let parsed: ApiResponse =
            serde_json::from_str(&text).map_err(|e| DeliveryError::Decode(e.to_string()))?;

        Ok(ChatReply::new(parsed.reply))
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
