use std::io;

use crate::DigestAlgorithm;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("invalid hex digest {value:?}: {source}")]
    InvalidHex {
        value:  String,
        source: hex::FromHexError,
    },

    #[error("no {0} digest was accumulated")]
    MissingDigest(DigestAlgorithm),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("illegal state: {0}")]
    IllegalState(&'static str),
}

pub type Result<T> = std::result::Result<T, VerificationError>;
