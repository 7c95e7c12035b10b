//! End-of-run reporting.
//!
//! The writer already logs its own tally when it exits; these helpers give
//! the CLI layer one place to report the run outcome: the summary counters
//! and a throughput line derived from them.

use std::time::Instant;

use log::{info, warn};

use crate::pipeline::PipelineSummary;

/// Logs the outcome counters of a completed run.
pub fn log_run_summary(summary: &PipelineSummary) {
    info!("Load summary:");
    info!("  records processed: {}", summary.records_processed);
    info!("  records skipped: {}", summary.records_skipped);
    info!("  batches flushed: {}", summary.batches_flushed);
    info!("  records inserted: {}", summary.records_inserted);
    let lost = summary.records_processed.saturating_sub(summary.records_inserted);
    if lost > 0 {
        warn!("  records lost to sink errors: {lost}");
    }
}

/// Times one load and reports line throughput against the final tally.
///
/// The line count is `records_processed + records_skipped` — every line the
/// writer accounted for, whether it was stored or dropped as a header.
pub struct RunTimer {
    started: Instant,
}

impl RunTimer {
    /// Start timing a run.
    #[must_use]
    pub fn start() -> Self {
        Self { started: Instant::now() }
    }

    /// Log how long the run took and how fast lines moved through it.
    pub fn finish(&self, summary: &PipelineSummary) {
        let lines = summary.records_processed + summary.records_skipped;
        info!("{}", throughput_line(lines, self.started.elapsed().as_secs_f64()));
    }
}

/// Render the completion line for a run of `lines` lines over `secs` seconds.
///
/// Sub-second runs get millisecond precision and no rate; the rate on a
/// short run is dominated by startup cost and would only mislead.
fn throughput_line(lines: u64, secs: f64) -> String {
    if secs < 1.0 {
        return format!("Processed {lines} lines in {:.0}ms", secs * 1000.0);
    }
    let rate = lines as f64 / secs;
    format!("Processed {lines} lines in {secs:.1}s ({rate:.0} lines/s)")
}
