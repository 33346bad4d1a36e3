//! Layered configuration: built-in defaults, then a TOML file, then
//! `FIXITY_`-prefixed environment variables (`__` separates sections, e.g.
//! `FIXITY_RUN__CONCURRENCY=4`).
//!
//! Files written for the older checker use capitalized keys (`[Handler]`,
//! `LogLevel`, ...). Those are renamed to their current names before the
//! layers are merged, so environment overrides land on the same keys.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::{Dict, Value};
use figment::{Figment, Profile, Provider};
use fixity_verify::DigestAlgorithm;
use serde::{Deserialize, Deserializer};

use crate::options::{DEFAULT_BUFFER_SIZE, DEFAULT_READ_TIMEOUT, DEFAULT_RPC_TIMEOUT};
use crate::{ConfigError, Result, RunOptions};

pub const ENV_PREFIX: &str = "FIXITY_";

/// Capitalized keys of older config files and their current names.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("Handler", "handler"),
    ("Logging", "logging"),
    ("ServiceName", "service_name"),
    ("Host", "host"),
    ("Port", "port"),
    ("LogLevel", "level"),
    ("LogFile", "file"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub handler: ServiceConfig,
    pub logging: LoggingConfig,
    pub run:     RunConfig,
}

/// Where the inventory service listens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub service_name: String,
    pub host:         String,
    pub port:         u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "handler".to_string(),
            host:         "localhost".to_string(),
            port:         8083,
        }
    }
}

impl ServiceConfig {
    pub fn endpoint(&self) -> String { format!("http://{}:{}", self.host, self.port) }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `fixity_checker=debug`.
    pub level: String,
    /// Append to this file instead of writing to stdout. Blank means stdout.
    #[serde(deserialize_with = "non_blank_path")]
    pub file:  Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file:  None,
        }
    }
}

impl LoggingConfig {
    /// The log file, if one is set and not blank.
    pub fn log_file(&self) -> Option<&Path> {
        self.file.as_deref().filter(|path| !is_blank(path))
    }
}

fn is_blank(path: &Path) -> bool { path.to_string_lossy().trim().is_empty() }

fn non_blank_path<'de, D>(deserializer: D) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let path = Option::<PathBuf>::deserialize(deserializer)?;
    Ok(path.filter(|path| !is_blank(path)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub concurrency:          usize,
    pub rpc_timeout_secs:     u64,
    pub read_timeout_secs:    u64,
    pub connect_timeout_secs: u64,
    /// Unset means the run has no overall limit.
    pub run_timeout_secs:     Option<u64>,
    pub buffer_size:          usize,
    pub algorithm:            String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency:          1,
            rpc_timeout_secs:     DEFAULT_RPC_TIMEOUT.as_secs(),
            read_timeout_secs:    DEFAULT_READ_TIMEOUT.as_secs(),
            connect_timeout_secs: 10,
            run_timeout_secs:     None,
            buffer_size:          DEFAULT_BUFFER_SIZE,
            algorithm:            DigestAlgorithm::Sha512.as_str().to_string(),
        }
    }
}

impl RunConfig {
    pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }

    /// Validate and convert into the options a run is started with.
    pub fn run_options(&self) -> Result<RunOptions> {
        if self.concurrency == 0 {
            return Err(invalid("run.concurrency", "must be at least 1"));
        }
        if self.buffer_size == 0 {
            return Err(invalid("run.buffer_size", "must be at least 1"));
        }
        if self.rpc_timeout_secs == 0 {
            return Err(invalid("run.rpc_timeout_secs", "must be at least 1"));
        }
        if self.read_timeout_secs == 0 {
            return Err(invalid("run.read_timeout_secs", "must be at least 1"));
        }
        let algorithm: DigestAlgorithm = self.algorithm.parse().map_err(ConfigError::Algorithm)?;

        Ok(RunOptions::default()
            .concurrency(self.concurrency)
            .buffer_size(self.buffer_size)
            .rpc_timeout(Duration::from_secs(self.rpc_timeout_secs))
            .read_timeout(Duration::from_secs(self.read_timeout_secs))
            .run_timeout(self.run_timeout_secs.map(Duration::from_secs))
            .algorithm(algorithm))
    }
}

/// Rename legacy keys at every level, merging sections that appear under both
/// spellings.
fn normalize_keys(dict: Dict) -> Dict {
    let mut normalized = Dict::new();
    for (key, value) in dict {
        let key = LEGACY_KEYS
            .iter()
            .find(|(legacy, _)| *legacy == key)
            .map_or(key, |(_, current)| current.to_string());
        let value = match value {
            Value::Dict(tag, inner) => Value::Dict(tag, normalize_keys(inner)),
            other => other,
        };

        match (normalized.remove(&key), value) {
            (Some(Value::Dict(tag, mut existing)), Value::Dict(_, incoming)) => {
                existing.extend(incoming);
                normalized.insert(key, Value::Dict(tag, existing));
            }
            (_, value) => {
                normalized.insert(key, value);
            }
        }
    }
    normalized
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

impl CheckerConfig {
    /// The provider stack without validation. Keys absent from every layer
    /// take their `Default` value; an absent file contributes nothing.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            let file = Toml::file(path)
                .data()?
                .remove(&Profile::Default)
                .unwrap_or_default();
            figment = figment.merge(Serialized::defaults(normalize_keys(file)));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Merge all layers without validating, so callers can apply overrides
    /// first. `path` must exist when `required` is set.
    pub fn extract(path: &Path, required: bool) -> Result<Self> {
        if required && !path.is_file() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        Ok(Self::figment(Some(path))?.extract()?)
    }

    /// [`extract`](Self::extract), then [`validate`](Self::validate).
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let config = Self::extract(path, required)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.handler.host.trim().is_empty() {
            return Err(invalid("handler.host", "must not be empty"));
        }
        if self.handler.port == 0 {
            return Err(invalid("handler.port", "must not be 0"));
        }
        self.run.run_options().map(|_| ())
    }
}
