//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the tab URL in activity alerts.
pub const URL_PLACEHOLDER: &str = "{url}";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub activity: ActivityConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout. No timeout is applied when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: None,
        }
    }
}

impl ChatConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

fn default_endpoint() -> String {
    "http://localhost:3000/chat_api/chat".to_string()
}

/// What to do with a pending activity whose quiet window elapsed too soon
/// after the previous delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressedPolicy {
    /// Discard it. It is never redelivered.
    #[default]
    Drop,
    /// Keep it and re-arm for the earliest moment it becomes eligible.
    Rearm,
}

/// Activity alert configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Quiet period that must pass without a newer navigation.
    #[serde(default = "default_window_ms")]
    pub quiet_window_ms: u64,

    /// Minimum gap between two delivered alerts.
    #[serde(default = "default_window_ms")]
    pub min_interval_ms: u64,

    #[serde(default)]
    pub on_suppressed: SuppressedPolicy,

    #[serde(default = "default_alert_template")]
    pub alert_template: String,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            quiet_window_ms: default_window_ms(),
            min_interval_ms: default_window_ms(),
            on_suppressed: SuppressedPolicy::default(),
            alert_template: default_alert_template(),
        }
    }
}

impl ActivityConfig {
    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.quiet_window_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

fn default_window_ms() -> u64 {
    10_000
}

fn default_alert_template() -> String {
    format!("<ACTIVITY ALERT: {}>", URL_PLACEHOLDER)
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Also write logs to a daily-rolling file under `dir`.
    #[serde(default)]
    pub file: bool,

    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: false,
            dir: default_log_dir(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "~/.sidekick/logs".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
