//! Error types for jdu

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a run before or while producing the tree.
///
/// Per-entry filesystem failures during traversal are not represented here:
/// the walker logs them and skips the affected branch.
#[derive(Debug, Error)]
pub enum JduError {
    /// Command-line arguments could not be parsed or are out of range.
    #[error("{0}")]
    InvalidArguments(String),

    /// The root path does not exist.
    #[error("{} does not exist.", path.display())]
    RootNotFound { path: PathBuf },

    /// The root path is neither a regular file, a directory nor a symlink.
    #[error("{} is not a file, directory or symlink.", path.display())]
    UnsupportedRoot { path: PathBuf },

    /// Writing the rendered tree failed.
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),

    /// The logging subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl JduError {
    /// Build an argument error from any displayable message.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }
}
