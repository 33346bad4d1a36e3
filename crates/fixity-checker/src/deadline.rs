use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, timeout};

use crate::StepError;

/// A step exceeded its time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {0:?}")]
pub struct TimedOut(pub Duration);

/// Overall time budget of one run.
///
/// Every step runs under its own timeout, shortened to whatever remains of the
/// run when a run limit is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    ends_at: Option<Instant>,
}

impl Deadline {
    pub fn unbounded() -> Self { Self { ends_at: None } }

    /// Starts counting now. `None` never expires.
    pub fn after(limit: Option<Duration>) -> Self {
        Self {
            ends_at: limit.and_then(|limit| Instant::now().checked_add(limit)),
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.ends_at
            .map(|ends_at| ends_at.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool { self.remaining().is_some_and(|left| left.is_zero()) }

    /// The smaller of `step` and the time left in the run.
    pub fn budget(&self, step: Duration) -> Duration {
        self.remaining().map_or(step, |left| left.min(step))
    }

    pub async fn limit<F: Future>(&self, step: Duration, future: F) -> Result<F::Output, TimedOut> {
        let budget = self.budget(step);
        timeout(budget, future).await.map_err(|_| TimedOut(budget))
    }

    /// [`limit`](Self::limit) for fallible steps, folding the timeout into the
    /// step's own error.
    pub async fn try_limit<T, E, F>(&self, step: Duration, future: F) -> Result<T, StepError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<StepError>,
    {
        match self.limit(step, future).await {
            Ok(result) => result.map_err(Into::into),
            Err(elapsed) => Err(elapsed.into()),
        }
    }
}

impl Default for Deadline {
    fn default() -> Self { Self::unbounded() }
}
