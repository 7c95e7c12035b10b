//! Load a VCF file into the document store.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;

use vcfload_lib::logging::{RunTimer, log_run_summary};
use vcfload_lib::validation::validate_input_file;
use vcfload_lib::{LoaderBuilder, SinkConfig, SqliteSink};

use crate::commands::command::Command;

/// Tuning profile presets for the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Balanced defaults.
    Default,
    /// Bigger batches and deeper queues for large inputs.
    LargeFiles,
    /// Few threads and shallow queues for constrained memory.
    LowMemory,
}

/// Load a VCF file into a local SQLite document store.
///
/// Reads the file with one reader thread, parses lines on a pool of parser
/// workers, and writes batches from a single writer thread.
#[derive(Debug, Parser)]
#[command(
    name = "load",
    about = "Load a VCF file into the document store",
    long_about = r#"
Load a VCF file into a local SQLite document store.

Lines are read sequentially, parsed in parallel, accumulated into fixed-size
batches and written transactionally. Header lines (starting with '#') are
counted as skipped; record order in the store is not guaranteed to match the
input file.

The database location defaults to $VCFLOAD_DB_PATH (or vcf_records.db) and the
table to $VCFLOAD_TABLE (or vcf_records); --db-path and --table override both.

Example usage:
  vcfload load -i variants.vcf
  vcfload load -i variants.vcf --db-path cohort.db --threads 8
  vcfload load -i huge.vcf --profile large-files
"#
)]
pub struct Load {
    /// Input VCF file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Parser worker threads (0 = auto-detect)
    #[arg(long = "threads")]
    pub threads: Option<usize>,

    /// Records per database batch
    #[arg(long = "batch-size")]
    pub batch_size: Option<usize>,

    /// Capacity of the reader-to-parsers queue
    #[arg(long = "line-queue-capacity")]
    pub line_queue_capacity: Option<usize>,

    /// Capacity of the parsers-to-writer queue
    #[arg(long = "record-queue-capacity")]
    pub record_queue_capacity: Option<usize>,

    /// Tuning profile; explicit options override the profile's values
    #[arg(long = "profile", value_enum, default_value = "default")]
    pub profile: Profile,

    /// SQLite database path
    #[arg(long = "db-path")]
    pub db_path: Option<PathBuf>,

    /// Table name for variant records
    #[arg(long = "table")]
    pub table: Option<String>,
}

impl Load {
    fn builder(&self) -> LoaderBuilder {
        let mut builder = match self.profile {
            Profile::Default => LoaderBuilder::new(),
            Profile::LargeFiles => LoaderBuilder::for_large_files(),
            Profile::LowMemory => LoaderBuilder::for_low_memory(),
        };
        if let Some(threads) = self.threads {
            builder = builder.with_parser_threads(threads);
        }
        if let Some(batch_size) = self.batch_size {
            builder = builder.with_batch_size(batch_size);
        }
        if let Some(capacity) = self.line_queue_capacity {
            builder = builder.with_line_queue_capacity(capacity);
        }
        if let Some(capacity) = self.record_queue_capacity {
            builder = builder.with_record_queue_capacity(capacity);
        }
        builder
    }

    fn sink_config(&self) -> SinkConfig {
        let mut config = SinkConfig::from_environment();
        if let Some(path) = &self.db_path {
            config.db_path = path.clone();
        }
        if let Some(table) = &self.table {
            config.table = table.clone();
        }
        config
    }
}

impl Command for Load {
    fn execute(&self) -> Result<()> {
        validate_input_file(&self.input)?;
        let loader = self.builder().build()?;
        let sink_config = self.sink_config();
        let sink = SqliteSink::open(&sink_config)?;

        info!("Input: {}", self.input.display());
        info!(
            "Database: {} (table {})",
            sink_config.db_path.display(),
            sink_config.table
        );

        let timer = RunTimer::start();
        let summary = loader.run(&self.input, sink)?;
        log_run_summary(&summary);
        timer.finish(&summary);
        Ok(())
    }
}
