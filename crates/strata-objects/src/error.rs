//! Error types for the object model.

use strata_types::{ObjectId, TypeError};

use crate::kind::ObjectKind;

/// Errors from object construction and decoding.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// An explicitly supplied id does not match the recomputed content hash.
    ///
    /// An invalid object is never stored; construction fails fast.
    #[error("invalid {kind} object: supplied id {supplied} does not match computed {computed}")]
    InvalidObject {
        kind: ObjectKind,
        supplied: ObjectId,
        computed: ObjectId,
    },

    /// A label was constructed without a name.
    #[error("label requires a non-empty name")]
    UnnamedLabel,

    /// An object had an unexpected kind (e.g. expected a tree, got a blob).
    #[error("expected {expected} object, got {actual}")]
    KindMismatch {
        expected: ObjectKind,
        actual: ObjectKind,
    },

    /// Serialization or deserialization of a record failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<TypeError> for ObjectError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::EmptyId => Self::UnnamedLabel,
        }
    }
}

/// Result alias for object operations.
pub type ObjectResult<T> = Result<T, ObjectError>;
