//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The base error type for `wn-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// An upstream collaborator handed the core data that violates its
    /// documented preconditions (bad coordinate, duplicate id, …).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wn-core`.
pub type CoreResult<T> = Result<T, CoreError>;
