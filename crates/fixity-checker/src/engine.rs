//! The run loop: enumerate once, then take every instance through
//! resolve → open → hash → compare → report.
//!
//! A failing instance never stops the run. Whatever its outcome, each started
//! instance gets exactly one status update and one audit record.

use std::time::Instant;

use fixity_inventory::{Inventory, ObjectInstance};
use fixity_storage::Storage;
use futures_util::{StreamExt, stream};
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::verifier::digest_stream;
use crate::{
    Deadline, Failure, InstanceOutcome, RunOptions, RunSummary, Stage, StepError, Verdict,
    Verified, enumerate, report, resolve,
};

/// Runs fixity checks against one inventory and one storage layer.
pub struct Checker<'a, I: ?Sized, S: ?Sized> {
    inventory: &'a I,
    storage:   &'a S,
    options:   &'a RunOptions,
}

impl<'a, I, S> Checker<'a, I, S>
where
    I: Inventory + ?Sized,
    S: Storage + ?Sized,
{
    pub fn new(inventory: &'a I, storage: &'a S, options: &'a RunOptions) -> Self {
        Self {
            inventory,
            storage,
            options,
        }
    }

    pub fn options(&self) -> &RunOptions { self.options }

    /// Check every instance the inventory lists.
    ///
    /// With `concurrency == 1` instances are checked and reported in inventory
    /// order; with more, reports arrive in completion order.
    pub async fn run(&self) -> RunSummary {
        let started = Instant::now();
        let deadline = Deadline::after(self.options.run_timeout);
        let mut summary = RunSummary::default();

        info!(
            concurrency = self.options.concurrency,
            algorithm = %self.options.algorithm,
            "fixity run started"
        );

        let instances = match enumerate(self.inventory, self.options, &deadline).await {
            Ok(instances) => instances,
            Err(failure) => {
                error!(stage = %failure.stage(), error = %failure, "enumeration failed, nothing to check");
                summary.enumeration_failed = true;
                summary.elapsed = started.elapsed();
                return summary;
            }
        };
        summary.enumerated = instances.len();

        let mut outcomes = stream::iter(instances)
            .map(|instance| self.process(instance, &deadline))
            .buffer_unordered(self.options.concurrency.max(1));

        while let Some(outcome) = outcomes.next().await {
            match outcome {
                Some(outcome) => summary.record(&outcome),
                None => summary.record_skipped(),
            }
        }

        summary.elapsed = started.elapsed();
        info!(
            enumerated = summary.enumerated,
            processed = summary.processed,
            ok = summary.ok,
            failed = summary.failed,
            skipped = summary.skipped,
            report_failures = summary.report_failures,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "fixity run finished"
        );
        summary
    }

    /// Check and report one instance. `None` when the run deadline passed
    /// before it could start.
    pub async fn process(
        &self,
        instance: ObjectInstance,
        deadline: &Deadline,
    ) -> Option<InstanceOutcome> {
        if deadline.is_expired() {
            warn!(instance_id = %instance.id, path = %instance.path, "run deadline reached, instance skipped");
            return None;
        }

        let span = info_span!("instance", instance_id = %instance.id, path = %instance.path);
        Some(self.process_instance(instance, deadline).instrument(span).await)
    }

    async fn process_instance(&self, instance: ObjectInstance, deadline: &Deadline) -> InstanceOutcome {
        debug!(stage = %Stage::Fetched, "checking instance");
        let result = self.check(&instance, deadline).await;
        let verdict = Verdict::from_result(&result);

        match &result {
            Ok(verified) => info!(
                stage = %Stage::Compared,
                algorithm = %verified.algorithm,
                bytes = verified.bytes,
                "fixity ok"
            ),
            Err(failure) if failure.is_integrity_failure() => {
                error!(stage = %failure.stage(), error = %failure, "fixity check failed")
            }
            Err(failure) => warn!(stage = %failure.stage(), error = %failure, "fixity check failed"),
        }

        let report_failures = report(self.inventory, &instance, &verdict, self.options).await;
        for failure in &report_failures {
            error!(stage = %Stage::Reported, error = %failure, "report write failed");
        }
        if report_failures.is_empty() {
            debug!(stage = %Stage::Reported, status = %verdict.status, "instance reported");
        }

        InstanceOutcome {
            instance_id: instance.id,
            verdict,
            failure: result.err().map(|failure| failure.kind()),
            report_failures: report_failures.len(),
        }
    }

    /// Resolve, read and compare one instance, without reporting.
    ///
    /// The stream is dropped before this returns, whatever the outcome.
    pub async fn check(
        &self,
        instance: &ObjectInstance,
        deadline: &Deadline,
    ) -> Result<Verified, Failure> {
        let resolved = resolve(self.inventory, instance, self.options, deadline).await?;
        debug!(stage = %Stage::LocationResolved, location = %resolved.location.id);

        let mut stream = deadline
            .try_limit(
                self.options.read_timeout,
                self.storage.open(&resolved.connection, &instance.path),
            )
            .await
            .map_err(|source| access_failure(instance, Stage::Opened, source))?;
        debug!(stage = %Stage::Opened);

        let algorithm = self.options.algorithm;
        let digested = digest_stream(
            &mut stream,
            &[algorithm],
            self.options.buffer_size,
            self.options.read_timeout,
            deadline,
        )
        .await;
        drop(stream);

        let digested = digested.map_err(|source| access_failure(instance, Stage::Hashed, source))?;
        let actual = digested
            .digests
            .require(algorithm)
            .map_err(|err| access_failure(instance, Stage::Hashed, err.into()))?
            .clone();
        debug!(stage = %Stage::Hashed, bytes = digested.bytes);

        if actual != resolved.expected {
            return Err(Failure::Mismatch {
                instance_id: instance.id.clone(),
                path: instance.path.clone(),
                expected: resolved.expected,
                actual,
            });
        }

        Ok(Verified {
            algorithm,
            checksum: actual,
            bytes: digested.bytes,
        })
    }
}

fn access_failure(instance: &ObjectInstance, stage: Stage, source: StepError) -> Failure {
    Failure::Access {
        instance_id: instance.id.clone(),
        path: instance.path.clone(),
        stage,
        source,
    }
}
