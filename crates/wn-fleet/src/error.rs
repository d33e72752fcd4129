//! Fleet and cost error type.

use thiserror::Error;

/// Errors produced by `wn-fleet`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FleetError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("fleet configuration error: {0}")]
    Config(String),
}

pub type FleetResult<T> = Result<T, FleetError>;
