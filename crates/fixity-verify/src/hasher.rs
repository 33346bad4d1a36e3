use std::fmt;
use std::str::FromStr;

use digest::Digest;

use crate::VerificationError;

pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

/// [`Hasher`] over any RustCrypto [`Digest`] implementation.
pub struct DigestHasher<D: Digest + Send>(D);

impl<D: Digest + Send> DigestHasher<D> {
    pub fn new() -> Self { Self(D::new()) }

    /// One-shot digest of `data`.
    pub fn digest(data: &[u8]) -> Vec<u8> { D::digest(data).to_vec() }
}

impl<D: Digest + Send> Default for DigestHasher<D> {
    fn default() -> Self { Self::new() }
}

impl<D: Digest + Send> Hasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) { Digest::update(&mut self.0, data); }
    fn finalize(self) -> Vec<u8> { Digest::finalize(self.0).to_vec() }
}

pub type Sha256Hasher = DigestHasher<sha2::Sha256>;

pub type Sha512Hasher = DigestHasher<sha2::Sha512>;

#[cfg(feature = "blake3")]
pub struct Blake3Hasher(blake3::Hasher);

#[cfg(feature = "blake3")]
impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().as_bytes().to_vec() }
}

#[cfg(feature = "blake3")]
impl Default for Blake3Hasher {
    fn default() -> Self { Self::new() }
}

#[cfg(feature = "blake3")]
impl Blake3Hasher {
    pub fn new() -> Self { Self(blake3::Hasher::new()) }

    pub fn digest(data: &[u8]) -> Vec<u8> { blake3::hash(data).as_bytes().to_vec() }
}

/// Digest algorithms the accumulator can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
    #[cfg(feature = "blake3")]
    Blake3,
}

impl DigestAlgorithm {
    /// Digest length in bytes.
    pub fn digest_length(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
            #[cfg(feature = "blake3")]
            DigestAlgorithm::Blake3 => 32,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha512 => "sha512",
            #[cfg(feature = "blake3")]
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// A fresh accumulator for this algorithm.
    pub fn hasher(&self) -> AnyHasher {
        match self {
            DigestAlgorithm::Sha256 => AnyHasher::Sha256(Sha256Hasher::new()),
            DigestAlgorithm::Sha512 => AnyHasher::Sha512(Sha512Hasher::new()),
            #[cfg(feature = "blake3")]
            DigestAlgorithm::Blake3 => AnyHasher::Blake3(Blake3Hasher::new()),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for DigestAlgorithm {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            #[cfg(feature = "blake3")]
            "blake3" => Ok(DigestAlgorithm::Blake3),
            _ => Err(VerificationError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Enum dispatch over the built-in hashers.
pub enum AnyHasher {
    Sha256(Sha256Hasher),
    Sha512(Sha512Hasher),
    #[cfg(feature = "blake3")]
    Blake3(Blake3Hasher),
}

impl Hasher for AnyHasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            AnyHasher::Sha256(h) => h.update(data),
            AnyHasher::Sha512(h) => h.update(data),
            #[cfg(feature = "blake3")]
            AnyHasher::Blake3(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            AnyHasher::Sha256(h) => h.finalize(),
            AnyHasher::Sha512(h) => h.finalize(),
            #[cfg(feature = "blake3")]
            AnyHasher::Blake3(h) => h.finalize(),
        }
    }
}
