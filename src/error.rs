use thiserror::Error;

/// Convenience result type for cleaning and analysis operations.
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Error type returned by every fallible operation in this crate.
///
/// Validation failures ([`CleaningError::InvalidArgument`], [`CleaningError::ColumnNotFound`])
/// are raised at call time, before any output is produced. Library errors are wrapped as-is.
#[derive(Debug, Error)]
pub enum CleaningError {
    /// An argument is outside its accepted domain (threshold range, chart mode, chart options).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A column name does not exist in the dataset.
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// CSV input does not conform to the provided schema.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A CSV value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// Underlying I/O error (chart output, CSV file access).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Error raised by the polars adapter.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleaningError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
