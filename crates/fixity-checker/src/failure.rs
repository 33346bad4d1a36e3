//! Typed outcomes of the per-instance pipeline.

use std::fmt;

use fixity_inventory::InventoryError;
use fixity_storage::StorageError;
use fixity_verify::{Checksum, VerificationError};
use serde::Serialize;

use crate::TimedOut;

/// Position of an instance in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fetched,
    LocationResolved,
    Opened,
    Hashed,
    Compared,
    Reported,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetched => "fetched",
            Stage::LocationResolved => "location_resolved",
            Stage::Opened => "opened",
            Stage::Hashed => "hashed",
            Stage::Compared => "compared",
            Stage::Reported => "reported",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One of the two writes made for every processed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWrite {
    Status,
    CheckRecord,
}

impl fmt::Display for ReportWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportWrite::Status => "status update",
            ReportWrite::CheckRecord => "check record",
        })
    }
}

/// Why a single step failed.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TimedOut(#[from] TimedOut),

    #[error("object {object_id} has no recorded checksum")]
    NoExpectedChecksum { object_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Enumeration,
    Resolution,
    Access,
    Mismatch,
    Report,
}

/// A failed step, with the instance it happened to.
///
/// The rendered message becomes the audit record's message, so every
/// per-instance variant names the instance path.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("cannot list object instances: {source}")]
    Enumeration { source: StepError },

    #[error("cannot resolve storage for '{path}': {source}")]
    Resolution {
        instance_id: String,
        path:        String,
        source:      StepError,
    },

    #[error("cannot read file '{path}': {source}")]
    Access {
        instance_id: String,
        path:        String,
        stage:       Stage,
        source:      StepError,
    },

    #[error("checksum mismatch for '{path}': expected {expected}, got {actual}")]
    Mismatch {
        instance_id: String,
        path:        String,
        expected:    Checksum,
        actual:      Checksum,
    },

    #[error("{write} failed for instance {instance_id}: {source}")]
    Report {
        instance_id: String,
        write:       ReportWrite,
        source:      StepError,
    },
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Enumeration { .. } => FailureKind::Enumeration,
            Failure::Resolution { .. } => FailureKind::Resolution,
            Failure::Access { .. } => FailureKind::Access,
            Failure::Mismatch { .. } => FailureKind::Mismatch,
            Failure::Report { .. } => FailureKind::Report,
        }
    }

    /// Stage the instance was in when the failure happened.
    pub fn stage(&self) -> Stage {
        match self {
            Failure::Enumeration { .. } => Stage::Fetched,
            Failure::Resolution { .. } => Stage::LocationResolved,
            Failure::Access { stage, .. } => *stage,
            Failure::Mismatch { .. } => Stage::Compared,
            Failure::Report { .. } => Stage::Reported,
        }
    }

    pub fn instance_id(&self) -> Option<&str> {
        match self {
            Failure::Enumeration { .. } => None,
            Failure::Resolution { instance_id, .. }
            | Failure::Access { instance_id, .. }
            | Failure::Mismatch { instance_id, .. }
            | Failure::Report { instance_id, .. } => Some(instance_id),
        }
    }

    /// `true` when the stored bytes themselves are suspect.
    pub fn is_integrity_failure(&self) -> bool { matches!(self, Failure::Mismatch { .. }) }
}
