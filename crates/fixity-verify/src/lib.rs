//! Digest primitives for fixity checking.
//!
//! Provides incremental hashing of stored content without buffering it: bytes
//! are fed to one or more accumulators as they stream past and the finalized
//! digests are compared against the value recorded at ingestion.
//!
//! # Key Features
//!
//! - **Streaming**: digests are computed as data passes through, payloads are discarded
//! - **Multi-algorithm**: [`MultiHasher`] computes several digests in one pass
//! - **Extensible**: the minimal [`Hasher`] trait allows custom implementations
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use fixity_verify::{Checksum, ChecksumWriter, DigestAlgorithm, Sha512Hasher};
//!
//! let expected = Checksum::new(Sha512Hasher::digest(b"hello world"));
//!
//! let mut writer = ChecksumWriter::new(&[DigestAlgorithm::Sha512], std::io::sink()).unwrap();
//! writer.write_all(b"hello world").unwrap();
//!
//! let digests = writer.finish().unwrap();
//! assert_eq!(digests.require(DigestAlgorithm::Sha512).unwrap(), &expected);
//! ```

pub use self::checksum::{Checksum, ChecksumSet};
pub use self::error::{Result, VerificationError};
pub use self::hasher::{AnyHasher, DigestAlgorithm, DigestHasher, Hasher, Sha256Hasher, Sha512Hasher};
pub use self::writer::{ChecksumWriter, MultiHasher};

#[cfg(feature = "blake3")]
pub use self::hasher::Blake3Hasher;

mod checksum;
mod error;
mod hasher;
mod writer;
