//! Periodic Tick Task
//!
//! A `TickHandle` owns a tokio task that runs a callback on a fixed period.
//! The task is aborted when the handle is cancelled or dropped, so whoever
//! holds the handle bounds the lifetime of the background work.
//!
//! Aborting alone is not enough on a multi-thread runtime: a tick already
//! running on another worker would finish after `abort()` returned. Each tick
//! therefore runs under a read lock on a shared run flag, and cancelling takes
//! the write lock to clear it. Once `cancel()` returns, no tick is running and
//! none will start.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owned, cancellable periodic task
#[derive(Debug)]
pub struct TickHandle {
    name: &'static str,
    running: Arc<RwLock<bool>>,
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Spawn `on_tick` every `period`, starting one period from now
    ///
    /// Ticks run sequentially on a single task; a slow tick delays the next
    /// one instead of overlapping it.
    pub fn spawn<F>(runtime: &Handle, name: &'static str, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let running = Arc::new(RwLock::new(true));
        let flag = running.clone();

        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                {
                    let running = flag.read();
                    if !*running {
                        break;
                    }
                    on_tick();
                }
            }
        });
        tracing::info!(task = name, period_ms = period.as_millis() as u64, "Started tick task");

        Self {
            name,
            running,
            task: Some(task),
        }
    }

    /// Stop the task now
    ///
    /// Waits for a tick that is already running to finish.
    pub fn cancel(mut self) {
        self.stop();
    }

    pub fn is_active(&self) -> bool {
        *self.running.read() && self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn stop(&mut self) {
        *self.running.write() = false;
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!(task = self.name, "Stopped tick task");
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
