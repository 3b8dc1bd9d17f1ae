//! # Sidekick Config
//!
//! Configuration management for the sidekick side panel.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{default_config_path, ConfigLoader};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
