//! Cancellable deferred tasks and last-write-wins debouncing

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{trace, warn};

/// Default quiet interval before a debounced value is released
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(1000);

/// A unit of work scheduled for a later instant that can be cancelled or
/// replaced before it runs. Dropping the task cancels it.
#[derive(Debug, Default)]
pub struct DeferredTask {
    handle: Option<JoinHandle<()>>,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending work with `work`, run once `deadline` passes.
    ///
    /// Returns false when no tokio runtime is available; nothing is
    /// scheduled in that case.
    pub fn schedule<F>(&mut self, deadline: Instant, work: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        match Handle::try_current() {
            Ok(runtime) => {
                self.handle = Some(runtime.spawn(async move {
                    sleep_until(deadline).await;
                    work.await;
                }));
                true
            }
            Err(_) => {
                warn!("No async runtime available, deferred task dropped");
                false
            }
        }
    }

    /// Cancel pending work. Returns true if something was actually cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Coalesces bursts of values into one, released after a quiet interval.
///
/// Each `push` restarts the timer; only the last value of a burst reaches
/// the receiver, no sooner than `interval` after that push.
#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    task: RefCell<DeferredTask>,
    tx: UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(interval: Duration) -> (Self, UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            interval,
            task: RefCell::new(DeferredTask::new()),
            tx,
        };
        (debouncer, rx)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Restart the quiet interval with `value` as the pending emission
    pub fn push(&self, value: T) {
        let deadline = Instant::now() + self.interval;
        let tx = self.tx.clone();
        let mut task = self.task.borrow_mut();
        if task.cancel() {
            trace!("Debounced emission superseded");
        }
        task.schedule(deadline, async move {
            // receiver gone means nobody is listening any more
            let _ = tx.send(value);
        });
    }

    pub fn is_pending(&self) -> bool {
        self.task.borrow().is_pending()
    }

    /// Drop the pending emission, if any
    pub fn cancel(&self) -> bool {
        self.task.borrow_mut().cancel()
    }
}
