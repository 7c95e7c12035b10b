#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - cast_*: Counter/byte arithmetic intentionally casts between numeric types
// - missing_*_doc: Documentation improvements tracked separately
// - needless_pass_by_value: Some APIs designed for ownership transfer
// - items_after_statements: Some test code uses late item declarations
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # vcfload - concurrent VCF ingestion library
//!
//! This library loads line-oriented variant-call (VCF) text files into a
//! document store through a bounded producer/consumer pipeline:
//!
//! ```text
//! file → reader → line queue → N parser workers → record queue → writer → sink
//! ```
//!
//! ## Overview
//!
//! - **[`pipeline`]** - the orchestrator, per-run [`pipeline::Context`], and
//!   the reader/parser/writer workers
//! - **[`queue`]** - the bounded blocking MPMC queue the stages communicate
//!   through
//! - **[`pool`]** - the fixed-size worker pool running parser tasks
//! - **[`parser`]** - pure line parsing ([`VcfLineParser`] and the
//!   [`LineParser`] seam)
//! - **[`sink`]** - the [`RecordSink`] contract and the SQLite implementation
//! - **[`config`]** - the [`LoaderBuilder`] configuration surface
//! - **[`errors`]** - the error taxonomy and its exit-code mapping
//!
//! ## Quick start
//!
//! ```no_run
//! use vcfload_lib::{LoaderBuilder, SinkConfig, SqliteSink};
//!
//! # fn main() -> vcfload_lib::Result<()> {
//! let loader = LoaderBuilder::new().with_batch_size(500).build()?;
//! let sink = SqliteSink::open(&SinkConfig::from_environment())?;
//! let summary = loader.run("input.vcf", sink)?;
//! println!("inserted {} records", summary.records_inserted);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency model
//!
//! One reader thread, N parser workers on a pool, one writer thread. The two
//! queues are the only shared mutable state and their fixed capacities are
//! the only backpressure. End-of-stream travels in-band: N end tokens from
//! the reader become N end tokens at the writer, one forwarded per parser.
//! Record order across parsers is unspecified.

pub mod config;
pub mod errors;
pub mod loader;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod pool;
pub mod progress;
pub mod queue;
pub mod record;
pub mod sink;
pub mod validation;

pub use config::{LoaderBuilder, PipelineConfig};
pub use errors::{Result, VcfLoadError};
pub use loader::VcfLoader;
pub use parser::{LineParser, VcfLineParser};
pub use pipeline::{Context, Pipeline, PipelineSummary};
pub use record::{LineEvent, ParsedRecord, RawLine, RecordEvent, VcfRecord};
pub use sink::{RecordSink, SinkConfig, SqliteSink};
