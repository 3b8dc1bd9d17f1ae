//! Activity debouncer - coalesces bursts of tab navigations.
//!
//! The debouncer is a plain state machine with two states:
//!
//! - IDLE: nothing pending.
//! - ARMED: one pending URL and one deadline.
//!
//! [`ActivityDebouncer::on_activity`] moves IDLE→ARMED or ARMED→ARMED,
//! replacing the pending URL and pushing the deadline out by the quiet
//! window. [`ActivityDebouncer::on_deadline`] moves ARMED→IDLE, delivering
//! the pending URL only if enough time has passed since the last delivery.
//!
//! Time is always passed in by the caller, which keeps the machine
//! deterministic under test and leaves timers to the driver.

use std::time::Duration;

use sidekick_config::{ActivityConfig, SuppressedPolicy};
use sidekick_protocols::ActivityEvent;
use tokio::time::Instant;
use tracing::debug;

/// Timing parameters of the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceSettings {
    /// How long the tab must stay put before an alert is considered.
    pub quiet_window: Duration,

    /// Minimum gap between two delivered alerts.
    pub min_interval: Duration,

    pub on_suppressed: SuppressedPolicy,
}

impl DebounceSettings {
    /// Same length for the quiet window and the minimum gap.
    pub fn uniform(window: Duration) -> Self {
        Self {
            quiet_window: window,
            min_interval: window,
            on_suppressed: SuppressedPolicy::Drop,
        }
    }

    pub fn from_config(config: &ActivityConfig) -> Self {
        Self {
            quiet_window: config.quiet_window(),
            min_interval: config.min_interval(),
            on_suppressed: config.on_suppressed,
        }
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    pub fn with_policy(mut self, policy: SuppressedPolicy) -> Self {
        self.on_suppressed = policy;
        self
    }
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self::from_config(&ActivityConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Armed,
}

/// An alert that should be sent now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub url: String,
    pub sent_at: Instant,
}

/// Result of a deadline check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// Send this alert.
    Deliver(Delivery),

    /// The quiet window elapsed but the previous delivery was too recent;
    /// the pending URL was discarded.
    Suppressed { url: String, elapsed: Duration },

    /// The pending URL was kept and re-armed for the moment it becomes eligible.
    Rearmed { deadline: Instant },

    /// Checked before the deadline; nothing changed.
    NotDue { deadline: Instant },

    /// Nothing was pending.
    Idle,
}

#[derive(Debug)]
struct Pending {
    event: ActivityEvent,
    deadline: Instant,
}

/// Coalesces navigation events into rate-limited alerts.
#[derive(Debug)]
pub struct ActivityDebouncer {
    settings: DebounceSettings,
    pending: Option<Pending>,
    last_sent_at: Option<Instant>,
    seeded: bool,
}

impl ActivityDebouncer {
    pub fn new(settings: DebounceSettings) -> Self {
        Self {
            settings,
            pending: None,
            last_sent_at: None,
            seeded: false,
        }
    }

    pub fn settings(&self) -> &DebounceSettings {
        &self.settings
    }

    pub fn state(&self) -> DebounceState {
        if self.pending.is_some() {
            DebounceState::Armed
        } else {
            DebounceState::Idle
        }
    }

    /// When the pending alert becomes due, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn pending_url(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.event.url.as_str())
    }

    /// Time of the last delivery. Before the first delivery this is the
    /// seed `first_event - min_interval`.
    pub fn last_sent_at(&self) -> Option<Instant> {
        self.last_sent_at
    }

    /// Record `event` as the latest activity and re-arm. Returns the new deadline.
    pub fn on_activity(&mut self, event: ActivityEvent, now: Instant) -> Instant {
        if !self.seeded {
            // Backdate so the first alert is never suppressed.
            self.last_sent_at = now.checked_sub(self.settings.min_interval);
            self.seeded = true;
        }

        let deadline = now + self.settings.quiet_window;
        debug!(url = %event.url, "Activity armed");
        if let Some(replaced) = self.pending.replace(Pending { event, deadline }) {
            debug!(url = %replaced.event.url, "Pending activity replaced");
        }
        deadline
    }

    /// Handle the pending deadline at `now`.
    pub fn on_deadline(&mut self, now: Instant) -> DebounceOutcome {
        let Some(pending) = self.pending.take() else {
            return DebounceOutcome::Idle;
        };

        if now < pending.deadline {
            let deadline = pending.deadline;
            self.pending = Some(pending);
            return DebounceOutcome::NotDue { deadline };
        }

        if let Some(last) = self.last_sent_at {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.settings.min_interval {
                return self.suppress(pending, last, elapsed);
            }
        }

        let sent_at = match self.last_sent_at {
            Some(last) => now.max(last),
            None => now,
        };
        self.last_sent_at = Some(sent_at);
        debug!(url = %pending.event.url, "Activity due for delivery");
        DebounceOutcome::Deliver(Delivery {
            url: pending.event.url,
            sent_at,
        })
    }

    fn suppress(&mut self, pending: Pending, last: Instant, elapsed: Duration) -> DebounceOutcome {
        match self.settings.on_suppressed {
            SuppressedPolicy::Drop => {
                debug!(
                    url = %pending.event.url,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Activity dropped, previous alert too recent"
                );
                DebounceOutcome::Suppressed {
                    url: pending.event.url,
                    elapsed,
                }
            }
            SuppressedPolicy::Rearm => {
                let deadline = last + self.settings.min_interval;
                debug!(url = %pending.event.url, "Activity re-armed until eligible");
                self.pending = Some(Pending {
                    event: pending.event,
                    deadline,
                });
                DebounceOutcome::Rearmed { deadline }
            }
        }
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod tests;
