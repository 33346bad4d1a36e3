use fixity_inventory::{Inventory, ObjectInstance, StorageLocationDescriptor};
use fixity_storage::Connection;
use fixity_verify::Checksum;
use tracing::trace;

use crate::{Deadline, Failure, RunOptions, StepError};

/// Everything needed to open and judge one instance.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub location:   StorageLocationDescriptor,
    pub connection: Connection,
    pub expected:   Checksum,
}

/// Fetch the instance's storage location and its object's expected digest.
///
/// Nothing is cached: every instance asks the inventory afresh.
pub async fn resolve<I>(
    inventory: &I,
    instance: &ObjectInstance,
    options: &RunOptions,
    deadline: &Deadline,
) -> Result<Resolved, Failure>
where
    I: Inventory + ?Sized,
{
    let failed = |source: StepError| Failure::Resolution {
        instance_id: instance.id.clone(),
        path: instance.path.clone(),
        source,
    };

    let location = deadline
        .try_limit(options.rpc_timeout, inventory.storage_location(&instance.id))
        .await
        .map_err(failed)?;
    let connection =
        Connection::from_json(&location.connection).map_err(|err| failed(err.into()))?;

    let object = deadline
        .try_limit(options.rpc_timeout, inventory.object(&instance.object_id))
        .await
        .map_err(failed)?;
    if object.checksum.trim().is_empty() {
        return Err(failed(StepError::NoExpectedChecksum {
            object_id: object.id,
        }));
    }
    let expected = Checksum::from_hex(&object.checksum).map_err(|err| failed(err.into()))?;

    trace!(
        location = %location.id,
        kind = %location.kind,
        vfs_entries = connection.vfs.len(),
        "location resolved"
    );
    Ok(Resolved {
        location,
        connection,
        expected,
    })
}

#[cfg(test)]
mod tests {
    use fixity_inventory::{MemoryInventory, Object};

    use super::*;

    const CONNECTION: &str =
        r#"{"folder":"archive","vfs":{"local":{"name":"local","type":"os","os":{"base_dir":"/srv"}}}}"#;

    fn inventory_with(connection: &str, checksum: &str) -> MemoryInventory {
        let inventory = MemoryInventory::new();
        inventory.insert_object(Object {
            id: "o1".into(),
            checksum: checksum.into(),
            ..Default::default()
        });
        inventory.insert_instance(
            ObjectInstance {
                id: "i1".into(),
                object_id: "o1".into(),
                path: "a.bin".into(),
                ..Default::default()
            },
            StorageLocationDescriptor {
                id: "l1".into(),
                kind: "os".into(),
                connection: connection.into(),
                ..Default::default()
            },
        );
        inventory
    }

    async fn resolve_i1(inventory: &MemoryInventory) -> Result<Resolved, Failure> {
        let instance = inventory.instance("i1").unwrap();
        resolve(inventory, &instance, &RunOptions::default(), &Deadline::unbounded()).await
    }

    #[tokio::test]
    async fn resolves_location_and_expected_digest() {
        let inventory = inventory_with(CONNECTION, "ABC123");
        let resolved = resolve_i1(&inventory).await.unwrap();
        assert_eq!(resolved.location.id, "l1");
        assert_eq!(resolved.connection.folder, "archive");
        assert_eq!(resolved.expected.to_hex(), "abc123");
    }

    #[tokio::test]
    async fn malformed_connection_is_a_resolution_failure() {
        let inventory = inventory_with("{not json", "abc123");
        let failure = resolve_i1(&inventory).await.unwrap_err();
        assert!(matches!(failure, Failure::Resolution { .. }));
        assert!(failure.to_string().contains("a.bin"));
    }

    #[tokio::test]
    async fn unparsable_expected_digest_is_a_resolution_failure() {
        let inventory = inventory_with(CONNECTION, "not-hex");
        let failure = resolve_i1(&inventory).await.unwrap_err();
        assert!(matches!(failure, Failure::Resolution {
            source: StepError::Verification(_),
            ..
        }));
    }

    #[tokio::test]
    async fn empty_expected_digest_is_a_resolution_failure() {
        let inventory = inventory_with(CONNECTION, "  ");
        let failure = resolve_i1(&inventory).await.unwrap_err();
        assert!(matches!(failure, Failure::Resolution {
            source: StepError::NoExpectedChecksum { .. },
            ..
        }));
    }

    #[tokio::test]
    async fn location_lookup_failure_is_a_resolution_failure() {
        let inventory = inventory_with(CONNECTION, "abc123");
        inventory.fail_location_for("i1");
        let failure = resolve_i1(&inventory).await.unwrap_err();
        assert!(matches!(failure, Failure::Resolution {
            source: StepError::Inventory(_),
            ..
        }));
    }
}
