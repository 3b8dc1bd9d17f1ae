//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::{Config, URL_PLACEHOLDER};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fail on the first error, otherwise hand back the warnings.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_chat(config, &mut result);
        Self::validate_activity(config, &mut result);
        Self::validate_logging(config, &mut result);
        result
    }

    fn validate_chat(config: &Config, result: &mut ValidationResult) {
        match Url::parse(&config.chat.endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => result.add_error(ValidationError::new(
                "chat.endpoint",
                format!("unsupported scheme '{}', expected http or https", url.scheme()),
            )),
            Err(e) => result.add_error(ValidationError::new(
                "chat.endpoint",
                format!("not a valid URL: {}", e),
            )),
        }

        if config.chat.timeout_seconds == Some(0) {
            result.add_error(ValidationError::new(
                "chat.timeout_seconds",
                "timeout_seconds must be greater than 0 when set",
            ));
        }
    }

    fn validate_activity(config: &Config, result: &mut ValidationResult) {
        if config.activity.quiet_window_ms == 0 {
            result.add_error(ValidationError::new(
                "activity.quiet_window_ms",
                "quiet_window_ms must be greater than 0",
            ));
        }

        if !config.activity.alert_template.contains(URL_PLACEHOLDER) {
            result.add_warning(ValidationWarning::new(
                "activity.alert_template",
                format!("template has no {} placeholder, alerts will not name the tab", URL_PLACEHOLDER),
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.file && config.logging.dir.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.dir",
                "dir cannot be empty when file logging is enabled",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
