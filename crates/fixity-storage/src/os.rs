use std::path::Path;

use async_trait::async_trait;
use tracing::trace;

use crate::error::from_io;
use crate::{Backend, ByteStream, Result, StorageError, VfsConfig};

/// Local filesystem backend: paths are opened below `os.base_dir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsBackend;

impl OsBackend {
    pub const KIND: &'static str = "os";
}

#[async_trait]
impl Backend for OsBackend {
    fn kind(&self) -> &str { Self::KIND }

    async fn open(&self, vfs: &VfsConfig, path: &Path) -> Result<ByteStream> {
        let settings = vfs.os.as_ref().ok_or_else(|| StorageError::MissingSettings {
            vfs:  vfs.name.clone(),
            kind: Self::KIND.to_string(),
        })?;

        let full_path = settings.base_dir.join(path);
        trace!(path = %full_path.display(), "opening file");

        let file = tokio::fs::File::open(&full_path)
            .await
            .map_err(|e| from_io(e, &full_path))?;
        Ok(Box::pin(file))
    }
}
