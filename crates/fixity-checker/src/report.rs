use fixity_inventory::{Inventory, ObjectInstance};

use crate::{Deadline, Failure, ReportWrite, RunOptions, Verdict};

/// Write the verdict back: the instance's new status, then its audit record.
///
/// Both writes are attempted whatever happens to the other. Neither is
/// retried. Returns the writes that failed.
pub async fn report<I>(
    inventory: &I,
    instance: &ObjectInstance,
    verdict: &Verdict,
    options: &RunOptions,
) -> Vec<Failure>
where
    I: Inventory + ?Sized,
{
    // Reporting is bounded per call only, so a started instance is always reported.
    let deadline = Deadline::unbounded();
    let mut failures = Vec::new();

    let updated = instance.with_status(verdict.status);
    if let Err(source) = deadline
        .try_limit(options.rpc_timeout, inventory.update_object_instance(&updated))
        .await
    {
        failures.push(Failure::Report {
            instance_id: instance.id.clone(),
            write: ReportWrite::Status,
            source,
        });
    }

    let check = verdict.check_for(&instance.id);
    if let Err(source) = deadline
        .try_limit(options.rpc_timeout, inventory.create_object_instance_check(&check))
        .await
    {
        failures.push(Failure::Report {
            instance_id: instance.id.clone(),
            write: ReportWrite::CheckRecord,
            source,
        });
    }

    failures
}
