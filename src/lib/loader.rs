//! Public entry point: validated configuration plus `run`.
//!
//! A [`VcfLoader`] is built once via [`crate::LoaderBuilder`] and can run any
//! number of files; each run gets a fresh [`Context`] so no queue or worker
//! state carries over between files.

use std::path::Path;

use log::info;

use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::parser::{LineParser, VcfLineParser};
use crate::pipeline::{Context, Pipeline, PipelineSummary};
use crate::sink::RecordSink;
use crate::validation::validate_input_file;

/// Loads VCF files into a record sink using the concurrent pipeline.
#[derive(Debug)]
pub struct VcfLoader {
    config: PipelineConfig,
}

impl VcfLoader {
    /// Used by the builder; library users go through [`crate::LoaderBuilder`].
    pub(crate) fn new(config: PipelineConfig) -> Self {
        info!(
            "loader created with {} parser threads, batch size {}",
            config.parser_count, config.batch_size
        );
        Self { config }
    }

    /// The validated configuration this loader runs with.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load `file_path` into `sink` using the standard VCF line parser.
    pub fn run<S>(&self, file_path: impl AsRef<Path>, sink: S) -> Result<PipelineSummary>
    where
        S: RecordSink + Send + 'static,
    {
        self.run_with_parser(file_path, VcfLineParser, sink)
    }

    /// Load `file_path` into `sink` with a caller-supplied parser.
    ///
    /// The file is validated up front (exists, regular, readable) so obvious
    /// mistakes fail before any thread is spawned; the reader still copes
    /// with the file disappearing between this check and the open.
    pub fn run_with_parser<P, S>(
        &self,
        file_path: impl AsRef<Path>,
        parser: P,
        sink: S,
    ) -> Result<PipelineSummary>
    where
        P: LineParser + Clone + Send + 'static,
        S: RecordSink + Send + 'static,
    {
        let file_path = file_path.as_ref();
        validate_input_file(file_path)?;

        let ctx = Context::new(self.config.clone());
        let summary = Pipeline::new(&ctx, file_path).execute(parser, sink)?;
        // Dropping the context joins the worker pool and frees the queues.
        drop(ctx);

        info!("completed processing '{}'", file_path.display());
        Ok(summary)
    }
}
