//! Error types for sprint-search operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for fetching and decoding tracker searches.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading a saved search.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The search response could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No saved response exists for the requested search.
    #[error("No search results found for '{name}' at {}", path.display())]
    SourceNotFound {
        /// Name of the search request.
        name: String,
        /// Location that was checked.
        path: PathBuf,
    },

    /// A search job was cancelled or panicked before delivering its batch.
    #[error("Search job '{0}' did not complete")]
    JobFailed(String),
}

/// A specialized Result type for sprint-search operations.
pub type Result<T> = std::result::Result<T, Error>;
