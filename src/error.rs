use thiserror::Error;

/// Convenience result type for fallible operations at the crate boundary.
pub type CleanerResult<T> = Result<T, CleanerError>;

/// Error type returned by ingestion, export and option loading.
///
/// The cleaning pipeline itself never fails: unparsable cells become [`crate::types::Value::Null`].
#[derive(Debug, Error)]
pub enum CleanerError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel ingestion error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV read or write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error for options or reports.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the expected shape (no header row, missing schema column, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the type forced by an explicit schema.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// Cleaning options failed validation.
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },
}
