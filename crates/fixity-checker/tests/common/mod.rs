#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use async_trait::async_trait;
use fixity_inventory::{MemoryInventory, Object, ObjectInstance, StorageLocationDescriptor};
use fixity_storage::{ByteStream, Connection, Storage, StorageError};
use fixity_verify::{Checksum, Sha256Hasher, Sha512Hasher};
use tokio::io::{AsyncRead, ReadBuf};

pub const CONNECTION: &str = r#"{"folder":"","vfs":{"mem":{"name":"mem","type":"memory"}}}"#;

#[derive(Clone)]
enum Content {
    Bytes(Vec<u8>),
    /// Serves `data`, then every further read fails.
    FailAfter(Vec<u8>),
    /// Never yields a byte.
    Stall,
}

/// Storage double keyed by instance path. Counts streams opened, dropped and
/// read from.
#[derive(Default)]
pub struct MemoryStorage {
    files:  Mutex<HashMap<String, Content>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    reads:  Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    fn put(&self, path: &str, content: Content) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), content);
    }

    pub fn insert(&self, path: &str, data: &[u8]) { self.put(path, Content::Bytes(data.to_vec())); }

    pub fn insert_failing(&self, path: &str, data: &[u8]) {
        self.put(path, Content::FailAfter(data.to_vec()));
    }

    pub fn insert_stalled(&self, path: &str) { self.put(path, Content::Stall); }

    pub fn opened(&self) -> usize { self.opened.load(Ordering::SeqCst) }

    pub fn closed(&self) -> usize { self.closed.load(Ordering::SeqCst) }

    pub fn reads(&self) -> usize { self.reads.load(Ordering::SeqCst) }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn open(&self, _connection: &Connection, path: &str) -> fixity_storage::Result<ByteStream> {
        let content = self
            .files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                path: PathBuf::from(path),
            })?;

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::pin(Tracked {
            content,
            pos: 0,
            closed: Arc::clone(&self.closed),
            reads: Arc::clone(&self.reads),
        }))
    }
}

struct Tracked {
    content: Content,
    pos:     usize,
    closed:  Arc<AtomicUsize>,
    reads:   Arc<AtomicUsize>,
}

impl AsyncRead for Tracked {
    fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let (data, fails) = match &this.content {
            Content::Bytes(data) => (data, false),
            Content::FailAfter(data) => (data, true),
            Content::Stall => return Poll::Pending,
        };
        this.reads.fetch_add(1, Ordering::SeqCst);

        if this.pos >= data.len() {
            return if fails {
                Poll::Ready(Err(io::Error::other("device read error")))
            } else {
                Poll::Ready(Ok(()))
            };
        }
        let n = (data.len() - this.pos).min(buf.remaining());
        buf.put_slice(&data[this.pos..this.pos + n]);
        this.pos += n;
        Poll::Ready(Ok(()))
    }
}

impl Drop for Tracked {
    fn drop(&mut self) { self.closed.fetch_add(1, Ordering::SeqCst); }
}

pub fn sha256_hex(data: &[u8]) -> String { Checksum::new(Sha256Hasher::digest(data)).to_hex() }

pub fn sha512_hex(data: &[u8]) -> String { Checksum::new(Sha512Hasher::digest(data)).to_hex() }

/// Add instance `id` at `path`, owned by object `o-<id>` expecting `checksum`.
pub fn seed(inventory: &MemoryInventory, id: &str, path: &str, checksum: &str) {
    seed_with_connection(inventory, id, path, checksum, CONNECTION);
}

pub fn seed_with_connection(
    inventory: &MemoryInventory,
    id: &str,
    path: &str,
    checksum: &str,
    connection: &str,
) {
    let object_id = format!("o-{id}");
    inventory.insert_object(Object {
        id: object_id.clone(),
        checksum: checksum.to_string(),
        ..Default::default()
    });
    inventory.insert_instance(
        ObjectInstance {
            id: id.to_string(),
            object_id,
            path: path.to_string(),
            size: 0,
            ..Default::default()
        },
        StorageLocationDescriptor {
            id: format!("loc-{id}"),
            alias: "primary".to_string(),
            kind: "memory".to_string(),
            connection: connection.to_string(),
        },
    );
}
