//! Error types for the sidekick protocol layer.

mod delivery;

pub use delivery::*;
