//! Parser worker: the loop each pool task runs.
//!
//! Drains the line queue, parses data lines, and forwards records. When it
//! dequeues an end token it forwards exactly one end token downstream and
//! returns; with N such tokens on the line queue, the writer is guaranteed
//! to see exactly N on the record queue. A parse failure terminates the
//! worker *without* a downstream end token — the orchestrator compensates
//! for that when it collects the error.

use crate::errors::Result;
use crate::parser::LineParser;
use crate::queue::BoundedQueue;
use crate::record::{LineEvent, RecordEvent};

/// Consume line events until an end token arrives.
pub(crate) fn run_parser_worker<P: LineParser>(
    parser: &P,
    input: &BoundedQueue<LineEvent>,
    output: &BoundedQueue<RecordEvent>,
) -> Result<()> {
    loop {
        match input.pop() {
            LineEvent::End => {
                output.push(RecordEvent::End);
                return Ok(());
            }
            LineEvent::Line(raw) => {
                let record = parser.parse(&raw)?;
                output.push(RecordEvent::Record(record));
            }
        }
    }
}
