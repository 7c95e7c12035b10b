//! Writer worker: batches records and flushes them to the sink.
//!
//! One writer thread per run, and the only code that touches the sink.
//! Records accumulate in a fixed-size batch; a full batch is flushed
//! immediately and the final partial batch is flushed when the last end
//! token arrives. Sink failures are logged and tolerated so a bad database
//! can never stall the upstream queues.

use log::{debug, error, info, warn};

use crate::queue::BoundedQueue;
use crate::record::{ParsedRecord, RecordEvent};
use crate::sink::RecordSink;

/// Counters accumulated by the writer over one run.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WriterReport {
    /// Data records appended to a batch.
    pub processed: u64,
    /// Header/blank records dropped without batching.
    pub skipped: u64,
    /// Non-empty batches handed to the sink (including failed attempts).
    pub flushed: u64,
    /// Records the sink reported as actually inserted.
    pub inserted: u64,
}

/// Drain the record queue until `sentinel_count` end tokens have been seen.
pub(crate) fn run_writer<S: RecordSink>(
    mut sink: S,
    queue: &BoundedQueue<RecordEvent>,
    batch_size: usize,
    sentinel_count: usize,
) -> WriterReport {
    if let Err(err) = sink.ensure_ready() {
        // Non-fatal: inserts will fail and be logged per batch.
        error!("record sink failed to initialise: {err}");
    }

    let mut report = WriterReport::default();
    let mut batch: Vec<ParsedRecord> = Vec::with_capacity(batch_size);
    let mut end_tokens_seen = 0usize;

    loop {
        match queue.pop() {
            RecordEvent::End => {
                end_tokens_seen += 1;
                debug!("writer received end token {end_tokens_seen}/{sentinel_count}");
                if end_tokens_seen >= sentinel_count {
                    flush_batch(&mut sink, &mut batch, &mut report);
                    break;
                }
            }
            RecordEvent::Record(record) => {
                if record.vcf_data.is_none() {
                    report.skipped += 1;
                    debug!("skipping header or blank line {}", record.line_number);
                    continue;
                }
                report.processed += 1;
                batch.push(record);
                if batch.len() >= batch_size {
                    flush_batch(&mut sink, &mut batch, &mut report);
                }
            }
        }
    }

    info!(
        "writer processed {} records, skipped {}, flushed {} batches",
        report.processed, report.skipped, report.flushed
    );
    report
}

/// Hand the current batch to the sink and clear it. An empty batch is a
/// no-op; a sink error loses the batch but never propagates.
fn flush_batch<S: RecordSink>(
    sink: &mut S,
    batch: &mut Vec<ParsedRecord>,
    report: &mut WriterReport,
) {
    if batch.is_empty() {
        return;
    }
    let batch_len = batch.len() as u64;
    debug!("flushing batch of {batch_len} records");
    match sink.insert_batch(batch) {
        Ok(inserted) => {
            if inserted < batch_len {
                warn!("partial insert: {inserted} of {batch_len} records written");
            }
            report.inserted += inserted;
        }
        Err(err) => {
            error!("batch insert failed, {batch_len} records lost: {err}");
        }
    }
    report.flushed += 1;
    batch.clear();
}
