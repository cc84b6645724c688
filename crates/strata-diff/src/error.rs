/// Errors from diff rendering and replay.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// Plain rendering or replay hit a conflict that was never resolved.
    ///
    /// A conflicted diff can only be materialized with explicit markers via
    /// [`Diff::new_content_with_markers`].
    ///
    /// [`Diff::new_content_with_markers`]: crate::diff::Diff::new_content_with_markers
    #[error("diff contains an unresolved conflict")]
    UnresolvedConflict,
}

/// Result alias for diff operations.
pub type DiffResult<T> = Result<T, DiffError>;
