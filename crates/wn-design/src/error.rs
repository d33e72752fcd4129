//! Design-stage error type.

use thiserror::Error;

use wn_core::CoreError;
use wn_spatial::SpatialError;

/// Errors produced by `wn-design`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DesignError {
    /// A stage needs at least one warehouse to assign orders to.
    #[error("no warehouses to assign orders to")]
    NoWarehouses,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type DesignResult<T> = Result<T, DesignError>;
