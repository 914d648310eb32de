//! Error types for tuning and level data loading.

use thiserror::Error;

/// Errors that can occur when loading combat tuning or level layouts.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The file parsed but a value makes no sense.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl DataLoadError {
    /// Map an I/O failure on `path` to the matching variant.
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.to_string())
        } else {
            Self::ReadError {
                path: path.to_string(),
                details: err.to_string(),
            }
        }
    }
}
