//! Error types for the foundation crate.

use thiserror::Error;

/// Errors from identifier primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// An object id was constructed from an empty string.
    #[error("object id must not be empty")]
    EmptyId,
}
