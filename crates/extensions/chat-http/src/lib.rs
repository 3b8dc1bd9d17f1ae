//! HTTP chat backend for sidekick.

mod api;
mod backend;

pub use backend::{HttpChatBackend, DEFAULT_ENDPOINT};
