use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fixity_checker::CheckerConfig;

pub const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Parser)]
#[command(name = "fixity", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
/// Verify the stored bytes of every archived object instance against the
/// digest recorded at ingestion.
pub struct Cli {
    /// Configuration file. Without this flag `config.toml` is read if present.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `fixity_checker=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Append logs to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Instances checked at the same time.
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Digest algorithm: sha512, sha256 or blake3.
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Summary format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl Cli {
    /// Layered configuration with command-line flags applied last.
    pub fn config(&self) -> anyhow::Result<CheckerConfig> {
        let (path, required) = match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        };

        let mut config = CheckerConfig::extract(&path, required)
            .with_context(|| format!("cannot load configuration from {}", path.display()))?;
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        if let Some(concurrency) = self.concurrency {
            config.run.concurrency = concurrency;
        }
        if let Some(algorithm) = &self.algorithm {
            config.run.algorithm = algorithm.clone();
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}
