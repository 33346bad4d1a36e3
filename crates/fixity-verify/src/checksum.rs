use std::collections::BTreeMap;
use std::fmt;

use crate::{DigestAlgorithm, Result, VerificationError};

/// Raw digest bytes. Equality is exact byte equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Checksum(Vec<u8>);

impl Checksum {
    pub fn new(bytes: Vec<u8>) -> Self { Self(bytes) }

    /// Parse a hex digest, accepting either case and surrounding whitespace.
    pub fn from_hex(value: &str) -> Result<Self> {
        hex::decode(value.trim())
            .map(Self)
            .map_err(|source| VerificationError::InvalidHex {
                value: value.to_string(),
                source,
            })
    }

    pub fn to_hex(&self) -> String { hex::encode(&self.0) }

    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_hex()) }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({})", self.to_hex())
    }
}

impl From<Vec<u8>> for Checksum {
    fn from(bytes: Vec<u8>) -> Self { Self(bytes) }
}

/// Finalized digests keyed by algorithm.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChecksumSet {
    digests: BTreeMap<DigestAlgorithm, Checksum>,
}

impl ChecksumSet {
    pub fn insert(&mut self, algorithm: DigestAlgorithm, checksum: Checksum) {
        self.digests.insert(algorithm, checksum);
    }

    pub fn get(&self, algorithm: DigestAlgorithm) -> Option<&Checksum> {
        self.digests.get(&algorithm)
    }

    /// Like [`get`](Self::get), but an absent algorithm is an error.
    pub fn require(&self, algorithm: DigestAlgorithm) -> Result<&Checksum> {
        self.get(algorithm)
            .ok_or(VerificationError::MissingDigest(algorithm))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DigestAlgorithm, &Checksum)> {
        self.digests.iter().map(|(algorithm, checksum)| (*algorithm, checksum))
    }

    pub fn len(&self) -> usize { self.digests.len() }

    pub fn is_empty(&self) -> bool { self.digests.is_empty() }
}
