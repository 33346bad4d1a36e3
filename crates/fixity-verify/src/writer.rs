use std::io::{self, Write};

use crate::hasher::AnyHasher;
use crate::{Checksum, ChecksumSet, DigestAlgorithm, Hasher, Result, VerificationError};

/// Accumulates several digests over the same byte stream.
pub struct MultiHasher {
    hashers: Vec<(DigestAlgorithm, AnyHasher)>,
    bytes:   u64,
}

impl MultiHasher {
    /// Duplicate algorithms are computed once.
    pub fn new(algorithms: &[DigestAlgorithm]) -> Result<Self> {
        if algorithms.is_empty() {
            return Err(VerificationError::IllegalState("no digest algorithm selected"));
        }

        let mut hashers: Vec<(DigestAlgorithm, AnyHasher)> = Vec::with_capacity(algorithms.len());
        for algorithm in algorithms {
            if hashers.iter().all(|(existing, _)| existing != algorithm) {
                hashers.push((*algorithm, algorithm.hasher()));
            }
        }

        Ok(Self { hashers, bytes: 0 })
    }

    pub fn update(&mut self, data: &[u8]) {
        for (_, hasher) in &mut self.hashers {
            hasher.update(data);
        }
        self.bytes += data.len() as u64;
    }

    /// Number of bytes fed so far.
    pub fn bytes_processed(&self) -> u64 { self.bytes }

    pub fn algorithms(&self) -> impl Iterator<Item = DigestAlgorithm> + '_ {
        self.hashers.iter().map(|(algorithm, _)| *algorithm)
    }

    pub fn finalize(self) -> ChecksumSet {
        let mut set = ChecksumSet::default();
        for (algorithm, hasher) in self.hashers {
            set.insert(algorithm, Checksum::new(hasher.finalize()));
        }
        set
    }
}

/// `Write` adapter that hashes everything written before forwarding it to
/// `target`. Pass [`io::sink()`] to hash and discard.
pub struct ChecksumWriter<W> {
    target: W,
    hasher: Option<MultiHasher>,
}

impl<W: Write> ChecksumWriter<W> {
    pub fn new(algorithms: &[DigestAlgorithm], target: W) -> Result<Self> {
        Ok(Self {
            target,
            hasher: Some(MultiHasher::new(algorithms)?),
        })
    }

    pub fn bytes_processed(&self) -> u64 {
        self.hasher.as_ref().map_or(0, MultiHasher::bytes_processed)
    }

    /// Flush the target and return the accumulated digests.
    pub fn finish(mut self) -> Result<ChecksumSet> {
        self.target.flush()?;
        self.hasher
            .take()
            .map(MultiHasher::finalize)
            .ok_or(VerificationError::IllegalState("checksum writer already finished"))
    }
}

impl<W: Write> Write for ChecksumWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let hasher = self
            .hasher
            .as_mut()
            .ok_or_else(|| io::Error::other("checksum writer already finished"))?;
        let n = self.target.write(buf)?;
        hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> { self.target.flush() }
}
