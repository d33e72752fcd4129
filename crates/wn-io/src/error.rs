//! Error types for wn-io.

use thiserror::Error;

use wn_spatial::SpatialError;

/// Errors that can occur while reading inputs or writing results.
///
/// A bad order row is not an error: it is reported as a
/// [`RejectedRow`](crate::RejectedRow) and the load continues.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("order file is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("malformed GeoJSON: {0}")]
    GeoJson(String),

    #[error("boundary data rejected: {0}")]
    Boundary(#[from] SpatialError),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "parquet")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Alias for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;
