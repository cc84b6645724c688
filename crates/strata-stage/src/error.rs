/// Errors from staging-area operations.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The requested path does not exist.
    #[error("no such file: {0}")]
    NotFound(String),

    /// `delete_dir` was called on a directory that still has contents.
    #[error("directory not empty: {0}")]
    DirectoryNotEmpty(String),

    /// The path cannot name a file (e.g. it ends with a separator).
    #[error("invalid file path: {0}")]
    InvalidPath(String),

    /// I/O error from the underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for staging-area operations.
pub type StageResult<T> = Result<T, StageError>;
