//! Pipeline configuration and the loader builder.
//!
//! [`LoaderBuilder`] is the user-facing configuration surface: fluent
//! setters, tuning profiles, and validation. [`PipelineConfig`] is the
//! validated struct the core consumes; the pipeline itself never re-checks
//! these values.

use std::thread;

use log::{info, warn};

use crate::errors::Result;
use crate::loader::VcfLoader;
use crate::validation::{validate_positive, validate_queue_capacity};

/// Default records per sink batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;
/// Default capacity of the reader → parsers queue.
pub const DEFAULT_LINE_QUEUE_CAPACITY: usize = 20_000;
/// Default capacity of the parsers → writer queue.
pub const DEFAULT_RECORD_QUEUE_CAPACITY: usize = 10_000;

/// Validated configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of parser workers (>= 1).
    pub parser_count: usize,
    /// Records per batch handed to the sink (>= 1).
    pub batch_size: usize,
    /// Capacity of the line queue (>= `batch_size`).
    pub line_queue_capacity: usize,
    /// Capacity of the record queue (>= `batch_size`).
    pub record_queue_capacity: usize,
}

/// Builder for a [`VcfLoader`].
///
/// ```
/// use vcfload_lib::LoaderBuilder;
///
/// let loader = LoaderBuilder::new()
///     .with_parser_threads(4)
///     .with_batch_size(500)
///     .build()
///     .unwrap();
/// assert_eq!(loader.config().parser_count, 4);
/// ```
#[derive(Debug, Clone)]
pub struct LoaderBuilder {
    parser_threads: usize,
    batch_size: usize,
    line_queue_capacity: usize,
    record_queue_capacity: usize,
}

impl Default for LoaderBuilder {
    fn default() -> Self {
        Self {
            parser_threads: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            line_queue_capacity: DEFAULT_LINE_QUEUE_CAPACITY,
            record_queue_capacity: DEFAULT_RECORD_QUEUE_CAPACITY,
        }
    }
}

impl LoaderBuilder {
    /// Builder with default settings; parser threads are auto-detected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile tuned for large inputs: bigger batches and deeper queues.
    #[must_use]
    pub fn for_large_files() -> Self {
        Self {
            parser_threads: 0,
            batch_size: 5000,
            line_queue_capacity: 50_000,
            record_queue_capacity: 25_000,
        }
    }

    /// Profile tuned for constrained memory: few threads, shallow queues.
    #[must_use]
    pub fn for_low_memory() -> Self {
        Self {
            parser_threads: 2,
            batch_size: 500,
            line_queue_capacity: 5000,
            record_queue_capacity: 2500,
        }
    }

    /// Set the number of parser threads. `0` auto-detects from the machine.
    #[must_use]
    pub fn with_parser_threads(mut self, n: usize) -> Self {
        self.parser_threads = n;
        self
    }

    /// Set the number of records per sink batch.
    #[must_use]
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    /// Set the capacity of the reader → parsers queue.
    #[must_use]
    pub fn with_line_queue_capacity(mut self, n: usize) -> Self {
        self.line_queue_capacity = n;
        self
    }

    /// Set the capacity of the parsers → writer queue.
    #[must_use]
    pub fn with_record_queue_capacity(mut self, n: usize) -> Self {
        self.record_queue_capacity = n;
        self
    }

    fn validate(&self) -> Result<()> {
        validate_positive(self.batch_size, "batch-size")?;
        validate_queue_capacity(self.line_queue_capacity, self.batch_size, "line-queue-capacity")?;
        validate_queue_capacity(
            self.record_queue_capacity,
            self.batch_size,
            "record-queue-capacity",
        )?;

        if self.parser_threads > 0 {
            let hardware = hardware_threads();
            if self.parser_threads > 2 * hardware {
                warn!(
                    "parser threads ({}) is more than 2x available parallelism ({hardware}); \
                     this may reduce throughput",
                    self.parser_threads
                );
            }
        }
        Ok(())
    }

    /// Validate the configuration and build a [`VcfLoader`].
    pub fn build(self) -> Result<VcfLoader> {
        self.validate()?;
        let parser_count = resolve_parser_threads(self.parser_threads);
        Ok(VcfLoader::new(PipelineConfig {
            parser_count,
            batch_size: self.batch_size,
            line_queue_capacity: self.line_queue_capacity,
            record_queue_capacity: self.record_queue_capacity,
        }))
    }
}

/// Resolve a requested thread count, auto-detecting when `0`.
///
/// Auto-detection leaves two threads for the reader and writer, with a floor
/// of one parser.
fn resolve_parser_threads(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    let resolved = hardware_threads().saturating_sub(2).max(1);
    info!("auto-detected {resolved} parser threads");
    resolved
}

fn hardware_threads() -> usize {
    thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
}
