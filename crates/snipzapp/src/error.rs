use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnipzError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Index {index} is out of range (category has {len} scripts)")]
    OutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Coarse classification of [`SnipzError`], for UIs that map errors to
/// inline field messages or retry prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    OutOfRange,
    Io,
}

impl SnipzError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SnipzError::Validation(_) => ErrorKind::Validation,
            SnipzError::NotFound(_) => ErrorKind::NotFound,
            SnipzError::Conflict(_) => ErrorKind::Conflict,
            SnipzError::OutOfRange { .. } => ErrorKind::OutOfRange,
            SnipzError::Io(_) | SnipzError::Serialization(_) | SnipzError::Store(_) => {
                ErrorKind::Io
            }
        }
    }

    /// Whether the failure happened while writing, after the in-memory change was applied.
    pub fn is_persistence_failure(&self) -> bool {
        self.kind() == ErrorKind::Io
    }
}

pub type Result<T> = std::result::Result<T, SnipzError>;
