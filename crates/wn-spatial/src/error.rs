//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `wn-spatial`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpatialError {
    #[error("invalid clustering parameter: {0}")]
    InvalidParameter(String),

    #[error("boundary unit {code}: {reason}")]
    InvalidGeometry { code: String, reason: String },

    #[error("duplicate boundary code {0}")]
    DuplicateCode(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
