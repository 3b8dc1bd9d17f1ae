//! Chat backend trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;
use crate::types::ChatMessage;

/// Reply returned by the chat service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// Core trait for chat services the side panel talks to.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the backend ID.
    fn id(&self) -> &str;

    /// Send `message` together with the conversation so far.
    async fn send(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<ChatReply, DeliveryError>;
}
