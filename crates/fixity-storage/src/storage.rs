use async_trait::async_trait;
use tracing::debug;

use crate::{BackendRegistry, ByteStream, Connection, OsBackend, Result, StorageError};

/// Turns a connection descriptor and an instance path into a byte stream.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn open(&self, connection: &Connection, path: &str) -> Result<ByteStream>;
}

/// [`Storage`] that dispatches on the VFS entry's backend kind.
pub struct VfsStorage {
    backends: BackendRegistry,
}

impl VfsStorage {
    pub fn new(backends: BackendRegistry) -> Self { Self { backends } }

    pub fn backends(&self) -> &BackendRegistry { &self.backends }
}

impl Default for VfsStorage {
    /// Every backend shipped with this crate.
    fn default() -> Self { Self::new(BackendRegistry::new().with(OsBackend)) }
}

#[async_trait]
impl Storage for VfsStorage {
    async fn open(&self, connection: &Connection, path: &str) -> Result<ByteStream> {
        let target = connection.resolve(path)?;
        let backend = self
            .backends
            .get(&target.vfs.kind)
            .ok_or_else(|| StorageError::UnsupportedBackend {
                kind: target.vfs.kind.clone(),
            })?;

        debug!(
            vfs = %target.vfs.name,
            kind = %target.vfs.kind,
            path = %target.path.display(),
            "opening stored object"
        );
        backend.open(target.vfs, &target.path).await
    }
}
