//! # Sidekick Activity
//!
//! Rate-limits tab navigation alerts on their way to the chat service.
//!
//! - [`ActivityDebouncer`] - synchronous state machine (IDLE / ARMED) that
//!   coalesces bursts of navigations into at most one delivery per quiet window
//! - [`ActivityRelay`] - tokio task that owns a debouncer, sleeps on its
//!   deadline and hands eligible alerts to an [`AlertSink`](sidekick_protocols::AlertSink)
//! - [`Clock`] - injectable time source

mod clock;
mod debouncer;
mod error;
mod relay;

pub use clock::{Clock, ManualClock, TokioClock};
pub use debouncer::{ActivityDebouncer, DebounceOutcome, DebounceSettings, DebounceState, Delivery};
pub use error::{RelayError, RelayResult};
pub use relay::{ActivityRelay, RelayHandle};
pub use sidekick_config::SuppressedPolicy;
