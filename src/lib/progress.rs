//! Progress tracking utilities.
//!
//! A thread-safe counter that logs a line each time the count crosses an
//! interval boundary. The reader uses it for lines read and the writer for
//! records written; both sides only ever call [`ProgressTracker::add`].

use std::sync::atomic::{AtomicU64, Ordering};

use log::info;

/// Thread-safe progress tracker that logs at interval boundaries.
pub struct ProgressTracker {
    /// Progress is logged whenever the count crosses a multiple of this.
    interval: u64,
    /// Message prefix for log output.
    message: String,
    count: AtomicU64,
}

impl ProgressTracker {
    /// Create a tracker with the given message prefix and a default interval
    /// of 100,000 items.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 100_000, message: message.into(), count: AtomicU64::new(0) }
    }

    /// Set the logging interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        assert!(interval > 0, "progress interval must be at least 1");
        self.interval = interval;
        self
    }

    /// Add to the count, logging once per interval boundary crossed.
    pub fn add(&self, additional: u64) {
        if additional == 0 {
            return;
        }
        let previous = self.count.fetch_add(additional, Ordering::Relaxed);
        let current = previous + additional;
        for boundary in (previous / self.interval + 1)..=(current / self.interval) {
            info!("{} {}", self.message, boundary * self.interval);
        }
    }

    /// The current count.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Log the final count, whether or not it falls on an interval boundary.
    pub fn log_final(&self) {
        info!("{} {} (complete)", self.message, self.count());
    }
}
