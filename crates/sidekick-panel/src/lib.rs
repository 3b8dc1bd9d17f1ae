//! # Sidekick Panel
//!
//! The side-panel controller. It owns the conversation, forwards user
//! messages and activity alerts to a [`ChatBackend`](sidekick_protocols::ChatBackend)
//! and publishes every message it records as a [`PanelEvent`].

mod apology;
mod controller;
mod conversation;

pub use apology::apology_for;
pub use controller::{format_alert, PanelController, PanelEvent, PanelSettings};
pub use conversation::Conversation;
