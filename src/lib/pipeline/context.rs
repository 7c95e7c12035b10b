//! Shared state for one pipeline run.
//!
//! A [`Context`] owns the two queues, the parser worker pool, and the
//! validated configuration. It contains no orchestration logic and a fresh
//! instance is created for each file processed, so no state leaks between
//! runs.

use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::pool::WorkerPool;
use crate::queue::BoundedQueue;
use crate::record::{LineEvent, RecordEvent};

/// Queues, worker pool and configuration for a single run.
pub struct Context {
    config: PipelineConfig,
    line_queue: Arc<BoundedQueue<LineEvent>>,
    record_queue: Arc<BoundedQueue<RecordEvent>>,
    pool: WorkerPool,
}

impl Context {
    /// Allocate queues at their configured capacities and a worker pool with
    /// one thread per parser.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let line_queue = Arc::new(BoundedQueue::new(config.line_queue_capacity));
        let record_queue = Arc::new(BoundedQueue::new(config.record_queue_capacity));
        let pool = WorkerPool::new(config.parser_count);
        Self { config, line_queue, record_queue, pool }
    }

    /// The reader → parsers queue.
    pub fn line_queue(&self) -> &Arc<BoundedQueue<LineEvent>> {
        &self.line_queue
    }

    /// The parsers → writer queue.
    pub fn record_queue(&self) -> &Arc<BoundedQueue<RecordEvent>> {
        &self.record_queue
    }

    /// The pool running parser workers.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Number of parser workers, which is also the sentinel count on both
    /// queues.
    pub fn parser_count(&self) -> usize {
        self.config.parser_count
    }

    /// Records per sink batch.
    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// The full configuration for this run.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
