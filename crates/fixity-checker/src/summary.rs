use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::{FailureKind, Verdict};

/// What happened to one processed instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceOutcome {
    pub instance_id:     String,
    pub verdict:         Verdict,
    pub failure:         Option<FailureKind>,
    pub report_failures: usize,
}

/// Totals of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub enumerated:          usize,
    pub processed:           usize,
    pub ok:                  usize,
    pub failed:              usize,
    /// Not started before the run deadline.
    pub skipped:             usize,
    pub resolution_failures: usize,
    pub access_failures:     usize,
    pub mismatches:          usize,
    /// Failed status or audit writes, counted per write.
    pub report_failures:     usize,
    pub enumeration_failed:  bool,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed:             Duration,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &InstanceOutcome) {
        self.processed += 1;
        if outcome.verdict.is_ok() {
            self.ok += 1;
        } else {
            self.failed += 1;
        }
        match outcome.failure {
            Some(FailureKind::Resolution) => self.resolution_failures += 1,
            Some(FailureKind::Access) => self.access_failures += 1,
            Some(FailureKind::Mismatch) => self.mismatches += 1,
            _ => {}
        }
        self.report_failures += outcome.report_failures;
    }

    pub fn record_skipped(&mut self) { self.skipped += 1; }

    /// Every instance was checked, matched and reported.
    pub fn is_clean(&self) -> bool {
        !self.enumeration_failed && self.failed == 0 && self.skipped == 0 && self.report_failures == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enumeration_failed {
            return write!(f, "enumeration failed, no instances checked ({:?})", self.elapsed);
        }
        write!(
            f,
            "checked {} of {} instances in {:?}: {} ok, {} failed ({} resolution, {} access, {} mismatch)",
            self.processed,
            self.enumerated,
            self.elapsed,
            self.ok,
            self.failed,
            self.resolution_failures,
            self.access_failures,
            self.mismatches,
        )?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        if self.report_failures > 0 {
            write!(f, ", {} report writes failed", self.report_failures)?;
        }
        Ok(())
    }
}

fn as_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
