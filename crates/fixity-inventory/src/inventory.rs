use async_trait::async_trait;

use crate::{NewCheck, Object, ObjectInstance, Result, StorageLocationDescriptor};

/// The inventory service as seen by the checker: the source of truth for
/// instances and objects, and the sink for status and audit writes.
///
/// # Implementations
///
/// - [`GrpcInventory`](crate::GrpcInventory): production client over gRPC
/// - `MemoryInventory` (feature `test-util`): in-process double for tests
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Every instance known to the inventory, in inventory order.
    async fn list_object_instances(&self) -> Result<Vec<ObjectInstance>>;

    /// Storage location holding the given instance.
    async fn storage_location(&self, instance_id: &str) -> Result<StorageLocationDescriptor>;

    async fn object(&self, object_id: &str) -> Result<Object>;

    /// Persist the instance, including its status.
    async fn update_object_instance(&self, instance: &ObjectInstance) -> Result<()>;

    /// Append an audit record.
    async fn create_object_instance_check(&self, check: &NewCheck) -> Result<()>;
}
