use strata_objects::ObjectError;
use strata_store::StoreError;

/// Errors from synchronization.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The source label does not exist or references nothing yet.
    #[error("nothing to sync: the source label references no commit")]
    NothingToSync,

    /// The destination's head is unknown to the source, so a plain
    /// fast-forward transfer would be unsafe. Raised before any object is
    /// transferred.
    #[error("the source and destination histories have diverged")]
    DivergedHistories,

    /// Object store failure on either side.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Object model failure.
    #[error(transparent)]
    Object(#[from] ObjectError),
}

/// Result alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
