use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset unavailable: {0}")]
    DatasetUnavailable(PathBuf),
    #[error("failed to parse dataset {path}: {reason}")]
    DatasetParseFailed { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    DatasetUnavailable,
    DatasetParseFailed,
    Io,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::DatasetUnavailable(_) => StoreErrorKind::DatasetUnavailable,
            StoreError::DatasetParseFailed { .. } => StoreErrorKind::DatasetParseFailed,
            StoreError::Io(_) => StoreErrorKind::Io,
        }
    }

    /// Short code that is safe to show to callers; carries no paths or parser detail.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            StoreErrorKind::DatasetUnavailable => "dataset-unavailable",
            StoreErrorKind::DatasetParseFailed => "dataset-parse-failed",
            StoreErrorKind::Io => "io-error",
        }
    }

    pub(crate) fn parse_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StoreError::DatasetParseFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
