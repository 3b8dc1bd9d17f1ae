//! Activity relay - drives an [`ActivityDebouncer`] on a tokio task.
//!
//! All debouncer state lives on one task, so no lock guards it. The task
//! waits on either the next navigation or the single armed deadline;
//! replacing the deadline is the only cancellation of a pending alert.
//! `shutdown` stops the task through a [`CancellationToken`], regardless of
//! how many [`RelayHandle`]s are still around.
//!
//! Deliveries are fire-and-forget: each one runs on its own task and the
//! relay goes straight back to accepting navigations.

use std::sync::Arc;

use sidekick_protocols::{ActivityEvent, AlertSink};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::debouncer::{ActivityDebouncer, DebounceOutcome, DebounceSettings, Delivery};
use crate::error::{RelayError, RelayResult};

/// Cloneable sender side of a relay.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    tx: mpsc::UnboundedSender<String>,
}

impl RelayHandle {
    /// Report a tab navigation to `url`.
    pub fn notify(&self, url: impl Into<String>) -> RelayResult<()> {
        self.tx.send(url.into()).map_err(|_| RelayError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A running relay task.
pub struct ActivityRelay {
    handle: RelayHandle,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ActivityRelay {
    /// Start the relay on the current tokio runtime.
    ///
    /// `clock` must agree with tokio's clock (see [`TokioClock`](crate::TokioClock)),
    /// since deadlines it produces are slept on with `tokio::time`.
    pub fn spawn(
        settings: DebounceSettings,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = ActivityDebouncer::new(settings);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(debouncer, clock, sink, rx, cancel.clone()));
        Self {
            handle: RelayHandle { tx },
            cancel,
            task,
        }
    }

    pub fn handle(&self) -> RelayHandle {
        self.handle.clone()
    }

    /// Report a tab navigation to `url`.
    pub fn notify(&self, url: impl Into<String>) -> RelayResult<()> {
        self.handle.notify(url)
    }

    /// Stop accepting activity and wait for the task to finish.
    ///
    /// Outstanding [`RelayHandle`]s do not keep the task alive; once this
    /// returns their `notify` fails with [`RelayError::Closed`]. Anything
    /// still pending is discarded. The task also stops on its own once every
    /// handle is dropped.
    pub async fn shutdown(self) -> RelayResult<()> {
        let Self {
            handle,
            cancel,
            task,
        } = self;
        drop(handle);
        cancel.cancel();
        task.await.map_err(|e| RelayError::TaskFailed(e.to_string()))
    }
}

async fn run(
    mut debouncer: ActivityDebouncer,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn AlertSink>,
    mut rx: mpsc::UnboundedReceiver<String>,
    cancel: CancellationToken,
) {
    debug!("Activity relay started");
    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("Activity relay cancelled");
                break;
            }
            received = rx.recv() => {
                let Some(url) = received else { break };
                let now = clock.now();
                debouncer.on_activity(ActivityEvent::new(url, now), now);
            }
            _ = sleep_until(deadline) => {
                match debouncer.on_deadline(clock.now()) {
                    DebounceOutcome::Deliver(delivery) => dispatch(&sink, delivery),
                    DebounceOutcome::Suppressed { url, .. } => {
                        info!(url = %url, "Activity alert suppressed");
                    }
                    DebounceOutcome::Rearmed { .. }
                    | DebounceOutcome::NotDue { .. }
                    | DebounceOutcome::Idle => {}
                }
            }
        }
    }

    rx.close();
    if let Some(url) = debouncer.pending_url() {
        debug!(url = %url, "Relay closed with pending activity, discarding");
    }
    debug!("Activity relay stopped");
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn dispatch(sink: &Arc<dyn AlertSink>, delivery: Delivery) {
    info!(url = %delivery.url, "Sending activity alert");
    let sink = Arc::clone(sink);
    tokio::spawn(async move {
        if let Err(e) = sink.deliver(&delivery.url).await {
            warn!(
                url = %delivery.url,
                kind = ?e.kind(),
                "Activity alert delivery failed: {}",
                e
            );
        }
    });
}
