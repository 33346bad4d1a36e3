//! Inventory model and client.
//!
//! The inventory service owns every [`Object`], [`ObjectInstance`] and storage
//! location; the checker only reads them, updates instance status and appends
//! [`NewCheck`] audit records. [`Inventory`] is the seam, [`GrpcInventory`]
//! talks to the real service. With the `test-util` feature, `MemoryInventory`
//! stands in for it in tests.

pub use error::{InventoryError, Result};
pub use grpc::GrpcInventory;
pub use inventory::Inventory;
#[cfg(any(test, feature = "test-util"))]
pub use memory::{Call, MemoryInventory};
pub use model::{InstanceStatus, NewCheck, Object, ObjectInstance, StorageLocationDescriptor};

mod error;
pub mod grpc;
mod inventory;
#[cfg(any(test, feature = "test-util"))]
mod memory;
mod model;
