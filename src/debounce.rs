// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Quiet-period coalescing for search input.
//!
//! Each keystroke schedules a commit to run after the configured quiet
//! period. Scheduling a new commit supersedes the previous one: the pending
//! timer task is aborted and a generation counter guards against a task
//! that was already past its sleep when superseded. Only the last keystroke
//! within the window ever commits.
//!
//! Dropping the [`Debouncer`] aborts any pending timer, so a commit can
//! never fire against a disposed owner.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use view_engine::debounce::Debouncer;
//!
//! # async fn example() {
//! let debouncer = Debouncer::new(Duration::from_millis(300));
//! debouncer.schedule(|| println!("committed"));
//! // A second schedule within 300ms cancels the first.
//! debouncer.schedule(|| println!("committed instead"));
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::trace;

/// Schedules at most one pending commit, replacing it on every call.
///
/// Must be used from within a Tokio runtime; [`schedule`](Self::schedule)
/// spawns the timer task on the current runtime.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// Schedule `commit` to run once the quiet period elapses, superseding
    /// any previously scheduled commit.
    pub fn schedule<F>(&self, commit: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let quiet = self.quiet;

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // A later schedule() may have raced past our abort; the
            // generation check makes superseded commits inert.
            if latest.load(Ordering::SeqCst) == generation {
                trace!(generation, "debounce quiet period elapsed, committing");
                commit();
            }
        }));
    }

    /// Drop any pending commit without running it.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str)) {
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |entry| sink.lock().push(entry))
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_fires_after_quiet_period() {
        let (log, record) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(move || record("a"));
        assert!(log.lock().is_empty());

        tokio::time::sleep(Duration::from_millis(301)).await;
        assert_eq!(*log.lock(), vec!["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_schedules_coalesce_to_last() {
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let debouncer = Debouncer::new(Duration::from_millis(300));

        for entry in ["a", "ab", "abc"] {
            let sink = Arc::clone(&log);
            debouncer.schedule(move || sink.lock().push(entry));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*log.lock(), vec!["abc"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_commit() {
        let (log, record) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(move || record("a"));
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(log.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_commit() {
        let (log, record) = recorder();
        {
            let debouncer = Debouncer::new(Duration::from_millis(300));
            debouncer.schedule(move || record("a"));
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(log.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_after_commit_fires_again() {
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let debouncer = Debouncer::new(Duration::from_millis(100));

        let sink = Arc::clone(&log);
        debouncer.schedule(move || sink.lock().push("first"));
        tokio::time::sleep(Duration::from_millis(150)).await;

        let sink = Arc::clone(&log);
        debouncer.schedule(move || sink.lock().push("second"));
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*log.lock(), vec!["first", "second"]);
    }
}
