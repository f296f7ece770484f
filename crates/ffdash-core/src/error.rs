//! Common error types for ingestion and storage

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised by the SQLite store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver error, message passed through unchanged
    #[error("{0}")]
    Database(#[from] rusqlite::Error),
}

/// Errors raised while loading a workbook into the store
#[derive(Debug, Error)]
pub enum IngestError {
    /// Workbook path does not exist
    #[error("workbook not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// File exists but is not a readable spreadsheet
    #[error("failed to parse workbook: {0}")]
    WorkbookParse(String),

    /// IO error while staging or reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store rejected the replacement
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IngestError {
    /// Whether the failure comes from the input file rather than the store
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            IngestError::FileNotFound(_) | IngestError::WorkbookParse(_)
        )
    }
}

/// Errors raised while parsing query filters
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Year filter that is neither `all` nor an integer
    #[error("invalid year filter: {0}")]
    InvalidYear(String),
}
