//! Input validation utilities.
//!
//! Pre-run checks for the input file and common parameter validation shared
//! by the configuration builder and the CLI. All failures use the structured
//! error types from [`crate::errors`] so they map onto the exit-code
//! taxonomy.

use std::fmt::Display;
use std::path::Path;

use crate::errors::{Result, VcfLoadError};

/// Validate an input file before the pipeline starts: the path must be
/// non-empty, exist, be a regular file, and be readable.
///
/// The reader still handles open failures at runtime (the file can change
/// between this check and the open); this check exists to fail fast with a
/// precise error before any thread is spawned.
pub fn validate_input_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(VcfLoadError::InvalidParameter {
            parameter: "input".to_string(),
            reason: "file path cannot be empty".to_string(),
        });
    }

    let metadata = match path.metadata() {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(VcfLoadError::FileNotFound { path: path.display().to_string() });
        }
        Err(err) => {
            return Err(VcfLoadError::Io {
                path: path.display().to_string(),
                reason: err.to_string(),
            });
        }
    };

    if !metadata.is_file() {
        return Err(VcfLoadError::InvalidParameter {
            parameter: "input".to_string(),
            reason: format!("path exists but is not a regular file: {}", path.display()),
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o444 == 0 {
            return Err(VcfLoadError::Io {
                path: path.display().to_string(),
                reason: "file exists but has no read permission".to_string(),
            });
        }
    }

    Ok(())
}

/// Validate that a value is positive (> 0).
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(VcfLoadError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("must be > 0, got {value}"),
        });
    }
    Ok(())
}

/// Validate that a queue capacity can hold at least one full batch.
///
/// A capacity below the batch size could park the writer on a batch that can
/// never fill.
pub fn validate_queue_capacity(capacity: usize, batch_size: usize, name: &str) -> Result<()> {
    if capacity < batch_size {
        return Err(VcfLoadError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("capacity ({capacity}) must be >= batch size ({batch_size})"),
        });
    }
    Ok(())
}
