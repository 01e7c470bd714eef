//! Error taxonomy for check runs.
//!
//! A detected difference is deliberately absent here: it is reported through
//! [`crate::runner::Outcome::exit_code`], never as an `Err`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a check run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The invocation is misconfigured (missing input file, bad manifest,
    /// unknown program). Shown to the user as-is.
    #[error("{0}")]
    Configuration(String),

    /// The content producer failed. Nothing has been written at this point.
    #[error("Content generation failed: {0}")]
    Generation(String),

    /// A read or write failed for a reason other than a missing input file.
    #[error("I/O error on {}", .path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// Writing to the info or error stream failed.
    #[error("Failed to write output")]
    Output(#[from] io::Error),
}

impl CheckError {
    /// Builds an [`CheckError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CheckError>;
