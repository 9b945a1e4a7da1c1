use std::sync::{mpsc, Arc};
use std::time::Duration;

use crawler_logging::{crawler_debug, crawler_info, crawler_warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{Backend, EngineEvent};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Owned handle to the one running status-poll schedule.
///
/// Dropping the handle cancels the schedule.
pub struct PollHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn spawn(
        runtime: &Handle,
        backend: Arc<dyn Backend>,
        interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let task = runtime.spawn(async move {
            run_status_poll(backend.as_ref(), interval, task_token, sink.as_ref()).await;
        });
        Self { token, task }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The poll loop has returned, through cancellation or a terminal report.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Polls `GET /status` every `interval` until a terminal report is delivered or
/// `token` is cancelled. The first poll happens one interval after start.
///
/// A transport failure counts as terminal. Nothing is emitted after
/// cancellation, including for a request that was in flight.
pub async fn run_status_poll(
    backend: &dyn Backend,
    interval: Duration,
    token: CancellationToken,
    sink: &dyn EventSink,
) {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    crawler_info!("Status polling started (every {:?})", interval);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                crawler_debug!("Status polling cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                crawler_debug!("Status polling cancelled during request");
                return;
            }
            result = backend.status() => result,
        };

        let terminal = match &result {
            Ok(status) => status.is_terminal(),
            Err(err) => {
                crawler_warn!("Status check failed: {}", err);
                true
            }
        };
        sink.emit(EngineEvent::Status(result));
        if terminal {
            crawler_info!("Status polling finished");
            return;
        }
    }
}
