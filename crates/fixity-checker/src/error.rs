use std::path::PathBuf;

use fixity_verify::VerificationError;

/// Errors raised while loading or validating checker configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(#[source] Box<figment::Error>),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field:  &'static str,
        reason: String,
    },

    #[error("unsupported digest algorithm: {0}")]
    Algorithm(#[source] VerificationError),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self { ConfigError::Load(Box::new(err)) }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
