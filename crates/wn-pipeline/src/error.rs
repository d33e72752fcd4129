//! Pipeline error type.

use thiserror::Error;

use wn_core::CoreError;
use wn_design::DesignError;
use wn_fleet::FleetError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// Orders or collaborator data that break the documented preconditions.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("design stage failed: {0}")]
    Design(#[from] DesignError),

    #[error("fleet or cost stage failed: {0}")]
    Fleet(#[from] FleetError),
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidInput(msg) => PipelineError::InvalidInput(msg),
            CoreError::Config(msg) => PipelineError::Config(msg),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
