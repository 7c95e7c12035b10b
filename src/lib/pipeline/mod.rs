//! The concurrent ingestion pipeline.
//!
//! One run wires `file → reader → line queue → N parser workers → record
//! queue → writer → sink`. Control flow is carried in-band: the reader ends
//! its stream with one end token per parser, and each parser forwards one
//! end token to the writer, so every worker terminates by draining its own
//! input with no out-of-band signalling.
//!
//! Failure handling keeps two promises: every worker is joined on every exit
//! path, and a parser failure surfaces to the caller. A failed parser never
//! forwards its end token, so for each collected parser error the
//! orchestrator injects one synthetic end token into the record queue (to
//! release the writer) and cancels and drains the reader (to release it and
//! any surviving parsers).

pub(crate) mod context;
pub(crate) mod parser_worker;
pub(crate) mod reader;
pub(crate) mod writer;

pub use context::Context;
pub use reader::CancelToken;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::errors::{Result, VcfLoadError};
use crate::parser::LineParser;
use crate::record::RecordEvent;
use crate::sink::RecordSink;

use parser_worker::run_parser_worker;
use reader::run_reader;
use writer::{WriterReport, run_writer};

/// Outcome counters for a completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Data records batched for the sink.
    pub records_processed: u64,
    /// Header/blank lines dropped by the writer.
    pub records_skipped: u64,
    /// Non-empty batches handed to the sink, including failed attempts.
    pub batches_flushed: u64,
    /// Records the sink acknowledged as inserted.
    pub records_inserted: u64,
}

impl From<WriterReport> for PipelineSummary {
    fn from(report: WriterReport) -> Self {
        Self {
            records_processed: report.processed,
            records_skipped: report.skipped,
            batches_flushed: report.flushed,
            records_inserted: report.inserted,
        }
    }
}

/// Orchestrator for one run over one input file.
///
/// Borrows a fresh [`Context`]; the context (and with it the queues and the
/// worker pool) is torn down by the caller when the run is over.
pub struct Pipeline<'a> {
    ctx: &'a Context,
    file_path: PathBuf,
}

impl<'a> Pipeline<'a> {
    /// A pipeline over `ctx` for the given input file.
    pub fn new(ctx: &'a Context, file_path: impl AsRef<Path>) -> Self {
        Self { ctx, file_path: file_path.as_ref().to_path_buf() }
    }

    /// Run the pipeline to completion.
    ///
    /// Spawns the reader and writer threads, submits one parser task per
    /// configured worker, and joins everything before returning. If any
    /// parser failed, the first error is returned — after all joins, so no
    /// thread outlives the call.
    pub fn execute<P, S>(self, parser: P, sink: S) -> Result<PipelineSummary>
    where
        P: LineParser + Clone + Send + 'static,
        S: RecordSink + Send + 'static,
    {
        let parser_count = self.ctx.parser_count();
        info!(
            "pipeline starting for '{}' with {parser_count} parser workers",
            self.file_path.display()
        );

        let cancel = CancelToken::new();
        let reader_handle = {
            let queue = Arc::clone(self.ctx.line_queue());
            let path = self.file_path.clone();
            let cancel = cancel.clone();
            thread::Builder::new()
                .name("vcfload-reader".to_string())
                .spawn(move || run_reader(&path, &queue, parser_count, true, &cancel))
                .map_err(spawn_error)?
        };

        let writer_handle = {
            let queue = Arc::clone(self.ctx.record_queue());
            let batch_size = self.ctx.batch_size();
            match thread::Builder::new()
                .name("vcfload-writer".to_string())
                .spawn(move || run_writer(sink, &queue, batch_size, parser_count))
            {
                Ok(handle) => handle,
                Err(err) => {
                    // Nothing will drain the record queue; stop the reader
                    // before reporting the failure.
                    cancel.cancel();
                    drain_until_finished(self.ctx, &reader_handle);
                    let _ = reader_handle.join();
                    return Err(spawn_error(err));
                }
            }
        };

        // A submit failure counts as a failed parser: that worker will never
        // consume its line-queue end token nor forward one to the writer.
        let mut errors: Vec<VcfLoadError> = Vec::new();
        let mut handles = Vec::with_capacity(parser_count);
        for _ in 0..parser_count {
            let input = Arc::clone(self.ctx.line_queue());
            let output = Arc::clone(self.ctx.record_queue());
            let parser = parser.clone();
            match self
                .ctx
                .pool()
                .submit(move || run_parser_worker(&parser, &input, &output))
            {
                Ok(handle) => handles.push(handle),
                Err(err) => errors.push(err),
            }
        }

        for handle in handles {
            if let Err(err) = handle.join() {
                errors.push(err);
            }
        }

        if !errors.is_empty() {
            warn!("pipeline encountered {} parser error(s)", errors.len());
            cancel.cancel();
            // One synthetic end token per failed parser completes the
            // writer's expected count.
            for _ in 0..errors.len() {
                self.ctx.record_queue().push(RecordEvent::End);
            }
            // With no surviving parsers the reader could be parked forever
            // on a full line queue; drain until it has exited.
            drain_until_finished(self.ctx, &reader_handle);
        }

        if reader_handle.join().is_err() {
            errors.push(VcfLoadError::WorkerPool {
                reason: "reader thread panicked".to_string(),
            });
        }
        let report = match writer_handle.join() {
            Ok(report) => report,
            Err(_) => {
                errors.push(VcfLoadError::WorkerPool {
                    reason: "writer thread panicked".to_string(),
                });
                WriterReport::default()
            }
        };

        if let Some(first) = errors.into_iter().next() {
            return Err(first);
        }
        info!("pipeline completed for '{}'", self.file_path.display());
        Ok(report.into())
    }
}

/// Pop line events until the reader thread has exited.
fn drain_until_finished<T>(ctx: &Context, reader_handle: &thread::JoinHandle<T>) {
    while !reader_handle.is_finished() {
        if ctx.line_queue().try_pop().is_none() {
            thread::sleep(Duration::from_millis(1));
        }
    }
}

fn spawn_error(err: std::io::Error) -> VcfLoadError {
    VcfLoadError::WorkerPool { reason: format!("failed to spawn thread: {err}") }
}
