//! Conversation types.

mod message;

pub use message::*;
