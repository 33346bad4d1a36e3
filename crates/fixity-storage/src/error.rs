use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage connection payload: {0}")]
    InvalidConnection(#[source] serde_json::Error),

    #[error("storage connection defines no vfs entry")]
    NoVfs,

    #[error("path does not name a vfs entry and the connection defines {count} of them")]
    AmbiguousVfs { count: usize },

    #[error("unknown vfs entry '{name}'")]
    UnknownVfs { name: String },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("unsupported storage backend '{kind}'")]
    UnsupportedBackend { kind: String },

    #[error("vfs entry '{vfs}' has no settings for backend '{kind}'")]
    MissingSettings { vfs: String, kind: String },

    #[error("path not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> StorageError {
    let path = path.into();
    match err.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound { path },
        std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied { path },
        _ => StorageError::Io { path, source: err },
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self { StorageError::InvalidConnection(err) }
}
