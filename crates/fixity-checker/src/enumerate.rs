use fixity_inventory::{Inventory, ObjectInstance};
use tracing::debug;

use crate::{Deadline, Failure, RunOptions};

/// List every instance once, in inventory order.
pub async fn enumerate<I>(
    inventory: &I,
    options: &RunOptions,
    deadline: &Deadline,
) -> Result<Vec<ObjectInstance>, Failure>
where
    I: Inventory + ?Sized,
{
    let instances = deadline
        .try_limit(options.rpc_timeout, inventory.list_object_instances())
        .await
        .map_err(|source| Failure::Enumeration { source })?;

    debug!(count = instances.len(), "enumerated object instances");
    Ok(instances)
}
