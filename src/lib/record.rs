//! Data types that flow through the ingestion pipeline.
//!
//! The reader produces [`LineEvent`]s, parser workers turn them into
//! [`RecordEvent`]s, and the writer batches [`ParsedRecord`]s for the sink.
//! End-of-stream is signalled in-band: the reader enqueues one
//! [`LineEvent::End`] per parser worker, and each parser worker forwards
//! exactly one [`RecordEvent::End`] before it exits.

use serde::Serialize;
use serde_json::Value;

/// One raw line read from the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number, strictly increasing within a file.
    pub line_number: u64,
    /// Line content without the trailing newline.
    pub text: String,
}

/// Item type of the line queue between the reader and the parser workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A data line to be parsed.
    Line(RawLine),
    /// End-of-stream token. The reader emits exactly one per parser worker.
    End,
}

/// The variant-call content of one data line.
///
/// `data` is the document stored alongside the fixed columns and always
/// carries the keys `FILTER` (string), `QUAL` (number or null), `INFO`
/// (object) and `FORMAT` (object).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VcfRecord {
    /// Chromosome name (CHROM column).
    pub chromosome: String,
    /// 1-based position (POS column).
    pub position: u64,
    /// Reference allele (REF column).
    pub ref_allele: String,
    /// Alternate allele (ALT column).
    pub alt_allele: String,
    /// Document with FILTER/QUAL/INFO/FORMAT.
    pub data: Value,
}

/// Result of parsing one raw line.
///
/// `vcf_data` is `None` for header and blank lines; the writer counts those
/// as skipped instead of batching them.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    /// Line number of the originating [`RawLine`].
    pub line_number: u64,
    /// The original line text, kept for diagnostics.
    pub raw_text: String,
    /// Parsed content, or `None` for header/blank lines.
    pub vcf_data: Option<VcfRecord>,
}

/// Item type of the record queue between the parser workers and the writer.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordEvent {
    /// A parsed record (possibly a skipped header line).
    Record(ParsedRecord),
    /// End-of-stream token, one per parser worker.
    End,
}

impl ParsedRecord {
    /// A record carrying no variant data, for header and blank lines.
    #[must_use]
    pub fn skipped(line_number: u64, raw_text: String) -> Self {
        Self { line_number, raw_text, vcf_data: None }
    }
}
