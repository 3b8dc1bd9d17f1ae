//! Tab activity types.

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::DeliveryError;

/// A tab navigation reported by the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    /// URL the tab switched to.
    pub url: String,

    /// When the navigation was observed.
    pub observed_at: Instant,
}

impl ActivityEvent {
    pub fn new(url: impl Into<String>, observed_at: Instant) -> Self {
        Self {
            url: url.into(),
            observed_at,
        }
    }
}

/// Receiver of debounced activity alerts.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert for `url`.
    async fn deliver(&self, url: &str) -> Result<(), DeliveryError>;
}
