use std::collections::HashMap;
use std::path::Path;
use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::{Result, VfsConfig};

/// An open, readable handle on stored bytes. Dropping it closes the handle.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;

/// One kind of storage backend (`os`, `s3`, ...).
#[async_trait]
pub trait Backend: Send + Sync {
    /// The `type` value of the VFS entries this backend serves.
    fn kind(&self) -> &str;

    /// Open `path`, relative to the entry's root, for reading.
    async fn open(&self, vfs: &VfsConfig, path: &Path) -> Result<ByteStream>;
}

/// Backends keyed by kind, matched case-insensitively.
pub struct BackendRegistry {
    backends: HashMap<String, Box<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Register a backend, replacing any previous one of the same kind.
    pub fn register(&mut self, backend: Box<dyn Backend>) {
        self.backends.insert(backend.kind().to_ascii_lowercase(), backend);
    }

    pub fn with(mut self, backend: impl Backend + 'static) -> Self {
        self.register(Box::new(backend));
        self
    }

    pub fn get(&self, kind: &str) -> Option<&dyn Backend> {
        self.backends
            .get(&kind.to_ascii_lowercase())
            .map(|backend| backend.as_ref())
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for BackendRegistry {
    fn default() -> Self { Self::new() }
}
