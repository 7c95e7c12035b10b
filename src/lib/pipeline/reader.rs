//! Reader worker: file lines onto the line queue.
//!
//! One reader thread per run. It emits one [`LineEvent::Line`] per input
//! line and always finishes by enqueuing exactly `sentinel_count` end
//! tokens, one per downstream parser, so parsers never wait on a stream that
//! will produce nothing more. Open and read failures are logged and treated
//! as end-of-file; they are not fatal to the run's joinability.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error};

use crate::progress::ProgressTracker;
use crate::queue::BoundedQueue;
use crate::record::{LineEvent, RawLine};

/// Cooperative cancellation flag checked by the reader between lines.
///
/// Cancellation is best-effort: a reader parked on a full queue or inside a
/// blocking read notices the flag only at the next line boundary.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Read `path` line by line onto `queue`, then emit the end tokens.
///
/// Blocks on the queue when it is full; that backpressure is what keeps disk
/// reads in step with parsing. Returns the number of data lines enqueued.
pub(crate) fn run_reader(
    path: &Path,
    queue: &BoundedQueue<LineEvent>,
    sentinel_count: usize,
    emit_sentinel: bool,
    cancel: &CancelToken,
) -> u64 {
    let progress = ProgressTracker::new("Read lines");

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!("failed to open '{}': {err}", path.display());
            if emit_sentinel {
                emit_end_tokens(queue, sentinel_count);
            }
            return 0;
        }
    };

    let reader = BufReader::new(file);
    let mut line_number = 0u64;
    for line in reader.lines() {
        if cancel.is_cancelled() {
            debug!("reader cancelled after {line_number} lines");
            break;
        }
        match line {
            Ok(text) => {
                line_number += 1;
                queue.push(LineEvent::Line(RawLine { line_number, text }));
                progress.add(1);
            }
            Err(err) => {
                // Treated as end-of-file: downstream still terminates cleanly.
                error!(
                    "read error on '{}' after line {line_number}: {err}",
                    path.display()
                );
                break;
            }
        }
    }

    if emit_sentinel {
        emit_end_tokens(queue, sentinel_count);
    }
    progress.log_final();
    line_number
}

fn emit_end_tokens(queue: &BoundedQueue<LineEvent>, sentinel_count: usize) {
    debug!("reader emitting {sentinel_count} end-of-stream tokens");
    for _ in 0..sentinel_count {
        queue.push(LineEvent::End);
    }
}
