use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// A tokio task that feeds messages back into an event loop, either once
/// after a delay or repeatedly on a fixed period.
///
/// The task is aborted when the `ScheduledTask` is cancelled or dropped, so
/// holding it in an `Option` slot gives the slot single ownership: replacing
/// the value cancels whatever ran before.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Send `message` once after `delay`.
    pub fn once<T>(delay: Duration, sender: mpsc::UnboundedSender<T>, message: T) -> Self
    where
        T: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = sender.send(message);
        });
        Self { handle }
    }

    /// Send a message built by `make` every `period`. The first message is
    /// sent one full period after scheduling.
    pub fn every<T, F>(period: Duration, sender: mpsc::UnboundedSender<T>, make: F) -> Self
    where
        T: Send + 'static,
        F: Fn() -> T + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if sender.send(make()).is_err() {
                    trace!("Scheduled task receiver dropped, ending");
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
