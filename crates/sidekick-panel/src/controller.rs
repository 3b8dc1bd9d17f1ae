//! Side-panel controller.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use sidekick_config::{ActivityConfig, URL_PLACEHOLDER};
use sidekick_protocols::{AlertSink, ChatBackend, ChatMessage, DeliveryError};

use crate::apology::apology_for;
use crate::conversation::Conversation;

const EVENT_CAPACITY: usize = 64;

/// Something the view should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// A message was appended to the conversation.
    Message(ChatMessage),
    /// The conversation was cleared.
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSettings {
    /// Alert text sent for a navigation; `{url}` is replaced with the tab URL.
    pub alert_template: String,
}

impl PanelSettings {
    pub fn from_config(config: &ActivityConfig) -> Self {
        Self {
            alert_template: config.alert_template.clone(),
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self::from_config(&ActivityConfig::default())
    }
}

/// Render an activity alert for `url`.
pub fn format_alert(template: &str, url: &str) -> String {
    template.replace(URL_PLACEHOLDER, url)
}

/// Owns the conversation and talks to the chat backend on its behalf.
pub struct PanelController {
    backend: Arc<dyn ChatBackend>,
    settings: PanelSettings,
    conversation: Mutex<Conversation>,
    events: broadcast::Sender<PanelEvent>,
}

impl PanelController {
    pub fn new(backend: Arc<dyn ChatBackend>, settings: PanelSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backend,
            settings,
            conversation: Mutex::new(Conversation::new()),
            events,
        }
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    /// Receive every message recorded from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the conversation.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.conversation.lock().messages().to_vec()
    }

    pub fn clear(&self) {
        let mut conversation = self.conversation.lock();
        conversation.clear();
        let _ = self.events.send(PanelEvent::Cleared);
    }

    /// Send a message typed by the user.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the text shown
    /// to the user is returned: the service's reply, or an apology when the
    /// request failed. Either way it is recorded as an assistant message.
    pub async fn send_user_message(&self, text: &str) -> Option<String> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }

        // The history sent along already contains the new message.
        let history = {
            let mut conversation = self.conversation.lock();
            self.record(&mut conversation, ChatMessage::user(message));
            conversation.messages().to_vec()
        };

        let shown = match self.backend.send(message, &history).await {
            Ok(reply) => reply.reply,
            Err(e) => {
                error!(kind = ?e.kind(), "Chat request failed: {}", e);
                apology_for(&e).to_string()
            }
        };
        self.record_assistant(&shown);
        Some(shown)
    }

    /// Tell the chat service the user switched to `url`.
    ///
    /// The alert itself is not recorded in the conversation; only the reply is.
    pub async fn send_activity_alert(&self, url: &str) -> Result<String, DeliveryError> {
        let alert = format_alert(&self.settings.alert_template, url);
        let history = self.history();
        debug!(url = %url, "Sending activity alert");

        let reply = self.backend.send(&alert, &history).await?;
        info!(url = %url, "Activity alert answered");
        self.record_assistant(&reply.reply);
        Ok(reply.reply)
    }

    fn record_assistant(&self, text: &str) {
        let mut conversation = self.conversation.lock();
        self.record(&mut conversation, ChatMessage::assistant(text));
    }

    /// Append and publish under the same guard, so subscribers see messages
    /// in history order.
    fn record(&self, conversation: &mut Conversation, message: ChatMessage) {
        conversation.push(message.clone());
        // No subscribers is fine; the panel may run headless.
        let _ = self.events.send(PanelEvent::Message(message));
    }
}

#[async_trait]
impl AlertSink for PanelController {
    async fn deliver(&self, url: &str) -> Result<(), DeliveryError> {
        self.send_activity_alert(url).await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
