use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{
    InstanceStatus, Inventory, InventoryError, NewCheck, Object, ObjectInstance, Result,
    StorageLocationDescriptor,
};

/// A call received by [`MemoryInventory`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListObjectInstances,
    StorageLocation(String),
    Object(String),
    UpdateObjectInstance { id: String, status: InstanceStatus },
    CreateObjectInstanceCheck(NewCheck),
}

#[derive(Default)]
struct State {
    instances:     Vec<ObjectInstance>,
    locations:     HashMap<String, StorageLocationDescriptor>,
    objects:       HashMap<String, Object>,
    checks:        Vec<NewCheck>,
    calls:         Vec<Call>,
    fail_listing:  bool,
    fail_location: HashSet<String>,
    fail_update:   HashSet<String>,
    fail_check:    HashSet<String>,
}

/// In-process inventory that records every call and can be told to fail.
#[derive(Default)]
pub struct MemoryInventory {
    state: Mutex<State>,
}

impl MemoryInventory {
    pub fn new() -> Self { Self::default() }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_object(&self, object: Object) {
        self.state().objects.insert(object.id.clone(), object);
    }

    /// Add an instance stored at `location`.
    pub fn insert_instance(&self, instance: ObjectInstance, location: StorageLocationDescriptor) {
        let mut state = self.state();
        state.locations.insert(instance.id.clone(), location);
        state.instances.push(instance);
    }

    pub fn fail_listing(&self) { self.state().fail_listing = true; }

    pub fn fail_location_for(&self, instance_id: &str) {
        self.state().fail_location.insert(instance_id.to_string());
    }

    pub fn fail_update_for(&self, instance_id: &str) {
        self.state().fail_update.insert(instance_id.to_string());
    }

    pub fn fail_check_for(&self, instance_id: &str) {
        self.state().fail_check.insert(instance_id.to_string());
    }

    pub fn instance(&self, instance_id: &str) -> Option<ObjectInstance> {
        self.state()
            .instances
            .iter()
            .find(|instance| instance.id == instance_id)
            .cloned()
    }

    /// Audit records accepted so far.
    pub fn checks(&self) -> Vec<NewCheck> { self.state().checks.clone() }

    pub fn calls(&self) -> Vec<Call> { self.state().calls.clone() }
}

fn unavailable(what: &str) -> InventoryError {
    InventoryError::Unavailable(format!("injected failure: {what}"))
}

#[async_trait]
impl Inventory for MemoryInventory {
    async fn list_object_instances(&self) -> Result<Vec<ObjectInstance>> {
        let mut state = self.state();
        state.calls.push(Call::ListObjectInstances);
        if state.fail_listing {
            return Err(unavailable("list object instances"));
        }
        Ok(state.instances.clone())
    }

    async fn storage_location(&self, instance_id: &str) -> Result<StorageLocationDescriptor> {
        let mut state = self.state();
        state.calls.push(Call::StorageLocation(instance_id.to_string()));
        if state.fail_location.contains(instance_id) {
            return Err(unavailable("storage location"));
        }
        state
            .locations
            .get(instance_id)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound {
                kind: "storage location for instance",
                id:   instance_id.to_string(),
            })
    }

    async fn object(&self, object_id: &str) -> Result<Object> {
        let mut state = self.state();
        state.calls.push(Call::Object(object_id.to_string()));
        state
            .objects
            .get(object_id)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound {
                kind: "object",
                id:   object_id.to_string(),
            })
    }

    async fn update_object_instance(&self, instance: &ObjectInstance) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::UpdateObjectInstance {
            id:     instance.id.clone(),
            status: instance.status,
        });
        if state.fail_update.contains(&instance.id) {
            return Err(unavailable("update object instance"));
        }
        match state.instances.iter_mut().find(|stored| stored.id == instance.id) {
            Some(stored) => {
                *stored = instance.clone();
                Ok(())
            }
            None => Err(InventoryError::NotFound {
                kind: "object instance",
                id:   instance.id.clone(),
            }),
        }
    }

    async fn create_object_instance_check(&self, check: &NewCheck) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::CreateObjectInstanceCheck(check.clone()));
        if state.fail_check.contains(&check.instance_id) {
            return Err(unavailable("create object instance check"));
        }
        state.checks.push(check.clone());
        Ok(())
    }
}
