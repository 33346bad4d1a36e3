//! Storage access for archived object instances.
//!
//! A storage location is described by an opaque JSON connection payload
//! ([`Connection`]). [`Storage::open`] resolves an instance path against it and
//! returns a [`ByteStream`] from the matching [`Backend`].

pub use backend::{Backend, BackendRegistry, ByteStream};
pub use connection::{Connection, OsConfig, Target, VfsConfig};
pub use error::{Result, StorageError, from_io};
pub use os::OsBackend;
pub use storage::{Storage, VfsStorage};

mod backend;
mod connection;
mod error;
mod os;
mod storage;
