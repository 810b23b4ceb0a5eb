//! A repeating task that re-fetches data on a fixed interval and hands each
//! result to a render callback.
//!
//! Each poll is an independent read, so there is nothing to reconcile between
//! ticks. Stopping the poller (or dropping its handle) is how a view that is
//! torn down cancels its refresh.

use std::{future::Future, time::Duration};

use tokio::{
  sync::watch,
  task::JoinHandle,
  time::MissedTickBehavior,
};

/// Default refresh period for live analytics.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy)]
pub struct Poller {
  interval: Duration,
}

impl Default for Poller {
  fn default() -> Self { Self::new(DEFAULT_INTERVAL) }
}

impl Poller {
  /// # Panics
  ///
  /// Panics if `interval` is zero.
  pub fn new(interval: Duration) -> Self {
    assert!(!interval.is_zero(), "poll interval must be non-zero");
    Self { interval }
  }

  pub fn interval(&self) -> Duration { self.interval }

  /// Spawn the polling task onto the current tokio runtime.
  ///
  /// The first fetch runs immediately. A fetch that overruns the interval
  /// delays the next tick instead of triggering a burst.
  pub fn spawn<F, Fut, T, R>(self, mut fetch: F, mut render: R) -> PollHandle
  where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send,
    T: Send + 'static,
    R: FnMut(T) + Send + 'static,
  {
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let interval = self.interval;

    let task = tokio::spawn(async move {
      let mut ticker = tokio::time::interval(interval);
      ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

      loop {
        tokio::select! {
          _ = stop_rx.changed() => break,
          _ = ticker.tick() => {
            tokio::select! {
              _ = stop_rx.changed() => break,
              value = fetch() => render(value),
            }
          }
        }
      }
      tracing::debug!("poller stopped");
    });

    PollHandle { stop: stop_tx, task: Some(task) }
  }
}

/// Owner of a running [`Poller`] task. Dropping it aborts the task.
#[derive(Debug)]
pub struct PollHandle {
  stop: watch::Sender<bool>,
  task: Option<JoinHandle<()>>,
}

impl PollHandle {
  /// Signal the task to stop and wait for it to finish. An in-flight fetch is
  /// abandoned; no render happens after this returns.
  pub async fn stop(mut self) {
    let _ = self.stop.send(true);
    if let Some(task) = self.task.take() {
      let _ = task.await;
    }
  }
}

impl Drop for PollHandle {
  fn drop(&mut self) {
    if let Some(task) = self.task.take() {
      task.abort();
    }
  }
}
