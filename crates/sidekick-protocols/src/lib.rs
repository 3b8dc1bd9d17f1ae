//! # Sidekick Protocols
//!
//! Types and traits shared by the side-panel crates.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`ChatBackend`] - Sends a message plus conversation history to the chat service
//! - [`AlertSink`] - Receives debounced activity alerts

pub mod activity;
pub mod chat;
pub mod error;
pub mod types;

pub use activity::{ActivityEvent, AlertSink};
pub use chat::{ChatBackend, ChatReply};
pub use error::{DeliveryError, DeliveryErrorKind};
pub use types::*;
