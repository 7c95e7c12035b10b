//! Custom error types for vcfload operations.
//!
//! Every failure the library surfaces is a [`VcfLoadError`]. Each variant maps
//! to a stable process exit code via [`VcfLoadError::exit_code`], which the CLI
//! layer uses when a run fails.

use thiserror::Error;

/// Result type alias for vcfload operations
pub type Result<T> = std::result::Result<T, VcfLoadError>;

/// Error type for vcfload operations
#[derive(Error, Debug)]
pub enum VcfLoadError {
    /// Invalid parameter or configuration value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Malformed input line
    #[error("Parse error on line {line_number}: {reason}")]
    Parse {
        /// 1-based line number in the input file
        line_number: u64,
        /// Explanation of the problem
        reason: String,
    },

    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was looked up
        path: String,
    },

    /// I/O failure reading or probing a file
    #[error("I/O error on '{path}': {reason}")]
    Io {
        /// Path the operation targeted
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Queue misuse or overflow
    #[error("Queue error: {reason}")]
    Queue {
        /// Explanation of the problem
        reason: String,
    },

    /// Worker pool or thread lifecycle failure
    #[error("Worker pool error: {reason}")]
    WorkerPool {
        /// Explanation of the problem
        reason: String,
    },

    /// Record sink / storage backend failure
    #[error("Database error: {reason}")]
    Database {
        /// Explanation of the problem
        reason: String,
    },
}

impl VcfLoadError {
    /// Map this error to a process exit code.
    ///
    /// This is a stable contract for the CLI: validation=2, parsing=3,
    /// file-not-found=4, I/O=5, queue=6, worker-pool=7, database=8.
    /// Success is 0 and any error not covered here is 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            VcfLoadError::InvalidParameter { .. } => 2,
            VcfLoadError::Parse { .. } => 3,
            VcfLoadError::FileNotFound { .. } => 4,
            VcfLoadError::Io { .. } => 5,
            VcfLoadError::Queue { .. } => 6,
            VcfLoadError::WorkerPool { .. } => 7,
            VcfLoadError::Database { .. } => 8,
        }
    }
}
