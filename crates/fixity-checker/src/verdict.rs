use fixity_inventory::{InstanceStatus, NewCheck};

use crate::{Failure, Verified};

/// What gets written back for one instance: its new status and the audit
/// record's error flag and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status:  InstanceStatus,
    pub error:   bool,
    pub message: String,
}

impl Verdict {
    pub fn passed() -> Self {
        Self {
            status:  InstanceStatus::Ok,
            error:   false,
            message: String::new(),
        }
    }

    pub fn failed(failure: &Failure) -> Self {
        Self {
            status:  InstanceStatus::Error,
            error:   true,
            message: failure.to_string(),
        }
    }

    /// Classify a pipeline outcome. Pure: no I/O, no logging.
    pub fn from_result(result: &Result<Verified, Failure>) -> Self {
        match result {
            Ok(_) => Self::passed(),
            Err(failure) => Self::failed(failure),
        }
    }

    pub fn is_ok(&self) -> bool { !self.error }

    /// The audit record for `instance_id`.
    pub fn check_for(&self, instance_id: &str) -> NewCheck {
        if self.error {
            NewCheck::failed(instance_id, self.message.clone())
        } else {
            NewCheck::passed(instance_id)
        }
    }
}
