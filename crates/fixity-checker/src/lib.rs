//! Fixity verification engine.
//!
//! A run lists every object instance known to the inventory, reads each one
//! from storage through a streaming digest, compares the result with the
//! digest recorded at ingestion and writes the outcome back as the instance's
//! status plus an append-only audit record.
//!
//! # Architecture
//!
//! ```text
//! enumerate ──▶ resolve ──▶ open ──▶ digest_stream ──▶ compare ──▶ Verdict ──▶ report
//!                  │           │            │               │
//!                  └───────────┴────────────┴───────────────┴──▶ Failure
//! ```
//!
//! Every step returns a typed [`Failure`]; [`Verdict::from_result`] turns the
//! outcome into what gets written back. A failing instance is reported and the
//! run moves on.
//!
//! # Example
//!
//! ```no_run
//! use fixity_checker::{Checker, RunOptions};
//! use fixity_inventory::MemoryInventory;
//! use fixity_storage::VfsStorage;
//!
//! # async fn example() {
//! let inventory = MemoryInventory::new();
//! let storage = VfsStorage::default();
//! let options = RunOptions::default();
//!
//! let summary = Checker::new(&inventory, &storage, &options).run().await;
//! println!("{summary}");
//! # }
//! ```

pub use config::{CheckerConfig, ENV_PREFIX, LoggingConfig, RunConfig, ServiceConfig};
pub use deadline::{Deadline, TimedOut};
pub use engine::Checker;
pub use enumerate::enumerate;
pub use error::{ConfigError, Result};
pub use failure::{Failure, FailureKind, ReportWrite, Stage, StepError};
pub use options::RunOptions;
pub use report::report;
pub use resolve::{Resolved, resolve};
pub use summary::{InstanceOutcome, RunSummary};
pub use verdict::Verdict;
pub use verifier::{Digested, Verified, digest_stream};

mod config;
mod deadline;
mod engine;
mod enumerate;
mod error;
mod failure;
mod options;
mod report;
mod resolve;
mod summary;
mod verdict;
mod verifier;
