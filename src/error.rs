use std::path::PathBuf;

/// Result type for hashout operations
pub type Result<T> = std::result::Result<T, HashoutError>;

/// The only two ways a run can fail. Both are fatal.
#[derive(Debug, thiserror::Error)]
pub enum HashoutError {
    #[error("open {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashoutError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read { path: path.into(), source }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }
}
