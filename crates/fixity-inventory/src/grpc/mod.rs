//! gRPC client for the inventory's `inventory.v1.CheckerService`.

pub mod proto;

use std::time::Duration;

use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, trace};

use crate::{
    Inventory, InventoryError, NewCheck, Object, ObjectInstance, Result, StorageLocationDescriptor,
};

const GET_ALL_OBJECT_INSTANCES: &str = "/inventory.v1.CheckerService/GetAllObjectInstances";
const GET_STORAGE_LOCATION: &str =
    "/inventory.v1.CheckerService/GetStorageLocationByObjectInstanceId";
const GET_OBJECT: &str = "/inventory.v1.CheckerService/GetObjectById";
const UPDATE_OBJECT_INSTANCE: &str = "/inventory.v1.CheckerService/UpdateObjectInstance";
const CREATE_OBJECT_INSTANCE_CHECK: &str =
    "/inventory.v1.CheckerService/CreateObjectInstanceCheck";

/// [`Inventory`] backed by a tonic channel. Cloning is cheap and clones share
/// the underlying connection.
#[derive(Debug, Clone)]
pub struct GrpcInventory {
    inner:    Grpc<Channel>,
    endpoint: String,
}

impl GrpcInventory {
    /// Connect to `endpoint` (e.g. `http://localhost:8083`).
    ///
    /// Fails if the service cannot be reached within `connect_timeout`.
    pub async fn connect(endpoint: impl Into<String>, connect_timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        let channel = Endpoint::from_shared(endpoint.clone())
            .map_err(|_| InventoryError::InvalidEndpoint(endpoint.clone()))?
            .connect_timeout(connect_timeout)
            .connect()
            .await
            .map_err(|source| InventoryError::Connect {
                endpoint: endpoint.clone(),
                source,
            })?;

        debug!(%endpoint, "connected to inventory");
        Ok(Self::from_channel(channel, endpoint))
    }

    pub fn from_channel(channel: Channel, endpoint: impl Into<String>) -> Self {
        Self {
            inner:    Grpc::new(channel),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    async fn unary<Req, Resp>(&self, path: &'static str, request: Req) -> Result<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let method = path.rsplit('/').next().unwrap_or(path);
        trace!(method, "inventory call");

        let mut grpc = self.inner.clone();
        grpc.ready()
            .await
            .map_err(|e| InventoryError::Unavailable(e.to_string()))?;

        let codec = ProstCodec::<Req, Resp>::default();
        let response = grpc
            .unary(tonic::Request::new(request), PathAndQuery::from_static(path), codec)
            .await
            .map_err(|status| InventoryError::Rpc {
                method,
                status: Box::new(status),
            })?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl Inventory for GrpcInventory {
    async fn list_object_instances(&self) -> Result<Vec<ObjectInstance>> {
        let instances: proto::ObjectInstances =
            self.unary(GET_ALL_OBJECT_INSTANCES, proto::NoParam {}).await?;
        Ok(instances
            .object_instances
            .into_iter()
            .map(ObjectInstance::from)
            .collect())
    }

    async fn storage_location(&self, instance_id: &str) -> Result<StorageLocationDescriptor> {
        let location: proto::StorageLocation = self
            .unary(GET_STORAGE_LOCATION, proto::Id {
                id: instance_id.to_string(),
            })
            .await?;
        Ok(location.into())
    }

    async fn object(&self, object_id: &str) -> Result<Object> {
        let object: proto::Object = self
            .unary(GET_OBJECT, proto::Id {
                id: object_id.to_string(),
            })
            .await?;
        Ok(object.into())
    }

    async fn update_object_instance(&self, instance: &ObjectInstance) -> Result<()> {
        let status: proto::Status = self
            .unary(UPDATE_OBJECT_INSTANCE, proto::ObjectInstance::from(instance))
            .await?;
        if status.ok {
            Ok(())
        } else {
            Err(InventoryError::Rejected {
                method: "UpdateObjectInstance",
            })
        }
    }

    async fn create_object_instance_check(&self, check: &NewCheck) -> Result<()> {
        let id: proto::Id = self
            .unary(CREATE_OBJECT_INSTANCE_CHECK, proto::ObjectInstanceCheck::from(check))
            .await?;
        trace!(check_id = %id.id, instance_id = %check.instance_id, "check recorded");
        Ok(())
    }
}
