use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for the fontcanon crate
#[derive(Debug, Error)]
pub enum Error {
    /// IO operations errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid file or directory path
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
    /// Font metadata query errors
    #[error("Metadata query error: {0}")]
    Metadata(String),
    /// A target family directory could not be created
    #[error("Could not create directory {}: {source}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A font could not be copied into place
    #[error("Could not copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An external tool could not be run or exited unsuccessfully
    #[error("{program} failed: {message}")]
    Exec { program: String, message: String },
}

/// Result type alias for fontcanon operations
pub type Result<T> = std::result::Result<T, Error>;
