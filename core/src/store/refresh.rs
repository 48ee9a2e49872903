// vitrine/src/store/refresh.rs

//! The periodic background refresh: the polling loop that keeps the cached
//! order book current while the application is open.

use crate::config::DEFAULT_POLL_INTERVAL;
use crate::store::definition::OrderStore;

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{event, Level};

/// Handle to a running refresh task. Dropping it aborts the task. An
/// in-flight fetch that gets aborted mid-read installed nothing, and one
/// that completes late installs a complete snapshot, so tearing the task
/// down is safe at any moment.
#[derive(Debug)]
pub struct RefreshGuard {
  handle: JoinHandle<()>,
}

impl RefreshGuard {
  /// Stops the refresh task now instead of at drop time.
  pub fn stop(self) {
    self.handle.abort();
  }
}

impl Drop for RefreshGuard {
  fn drop(&mut self) {
    self.handle.abort();
  }
}

/// Spawns a task that refetches the order book every `every`, starting with
/// an immediate fetch. A zero `every` falls back to
/// [`DEFAULT_POLL_INTERVAL`]. A failed tick records its error in the store's
/// error slot and the loop simply waits for the next tick; there is no early
/// retry and no backoff.
pub fn spawn_periodic_refresh(store: OrderStore, every: Duration) -> RefreshGuard {
  // tokio's interval rejects a zero period, and a panic inside the spawned
  // task would kill the loop with nothing recorded in the store.
  let every = if every.is_zero() {
    event!(Level::WARN, "Zero refresh interval requested, using the default cadence.");
    DEFAULT_POLL_INTERVAL
  } else {
    every
  };
  let handle = tokio::spawn(async move {
    let mut ticker = tokio::time::interval(every);
    loop {
      ticker.tick().await;
      match store.fetch_all().await {
        Ok(orders) => {
          event!(Level::DEBUG, orders = orders.len(), "Periodic refresh completed.")
        }
        Err(e) => event!(Level::WARN, error = %e, "Periodic refresh failed."),
      }
    }
  });
  RefreshGuard { handle }
}

impl OrderStore {
  /// Starts the periodic refresh at the configured poll interval.
  pub fn spawn_refresher(&self) -> RefreshGuard {
    spawn_periodic_refresh(self.clone(), self.poll_interval)
  }
}
