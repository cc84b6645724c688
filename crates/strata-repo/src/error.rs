use strata_objects::{ObjectError, ObjectKind};
use strata_stage::StageError;
use strata_store::StoreError;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The head pointer was assigned an object that is neither a commit nor
    /// a label.
    #[error("head must reference a commit or a label, got a {0}")]
    UnknownLabel(ObjectKind),

    /// A path does not resolve inside a commit's tree.
    #[error("path not found in commit tree: {0}")]
    PathNotFound(String),

    /// Object store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Staging area failure.
    #[error(transparent)]
    Stage(#[from] StageError),

    /// Object model failure.
    #[error(transparent)]
    Object(#[from] ObjectError),
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepositoryError>;
