//! Record sinks: where batches of parsed records end up.
//!
//! The pipeline's writer is the only caller of a sink, always from a single
//! thread, so implementations need no internal synchronisation. The concrete
//! [`SqliteSink`] persists records into a local SQLite database; tests supply
//! their own implementations to observe or fail batches.

pub mod sqlite;

pub use sqlite::{SinkConfig, SqliteSink};

use crate::errors::Result;
use crate::record::ParsedRecord;

/// Destination for batches of parsed records.
///
/// Called from the writer thread only. A sink failure is reported to the
/// caller but the pipeline treats it as non-fatal: the failed batch is lost
/// and draining continues.
pub trait RecordSink {
    /// Prepare the sink for writes. Called once before the first batch;
    /// must be idempotent.
    fn ensure_ready(&mut self) -> Result<()>;

    /// Persist one batch and return the number of records actually inserted.
    ///
    /// Records with `vcf_data: None` never reach a sink; the writer filters
    /// them out. A return value smaller than the batch length signals a
    /// partial insert, which the writer logs but does not retry.
    fn insert_batch(&mut self, batch: &[ParsedRecord]) -> Result<u64>;
}
