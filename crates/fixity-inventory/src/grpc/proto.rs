//! Wire messages of `inventory.v1` (see `proto/inventory.proto`).

#[derive(Clone, PartialEq, prost::Message)]
pub struct NoParam {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Id {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Status {
    #[prost(bool, tag = "1")]
    pub ok: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Object {
    #[prost(string, tag = "1")]
    pub id:        String,
    #[prost(string, tag = "2")]
    pub signature: String,
    #[prost(string, tag = "3")]
    pub checksum:  String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ObjectInstance {
    #[prost(string, tag = "1")]
    pub id:        String,
    #[prost(string, tag = "2")]
    pub path:      String,
    #[prost(int64, tag = "3")]
    pub size:      i64,
    #[prost(string, tag = "4")]
    pub created:   String,
    #[prost(string, tag = "5")]
    pub status:    String,
    #[prost(string, tag = "6")]
    pub object_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ObjectInstances {
    #[prost(message, repeated, tag = "1")]
    pub object_instances: Vec<ObjectInstance>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct StorageLocation {
    #[prost(string, tag = "1")]
    pub id:         String,
    #[prost(string, tag = "2")]
    pub alias:      String,
    #[prost(string, tag = "3")]
    pub r#type:     String,
    #[prost(string, tag = "4")]
    pub connection: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ObjectInstanceCheck {
    #[prost(string, tag = "1")]
    pub id:                 String,
    #[prost(string, tag = "2")]
    pub object_instance_id: String,
    #[prost(bool, tag = "3")]
    pub error:              bool,
    #[prost(string, tag = "4")]
    pub message:            String,
}

impl From<ObjectInstance> for crate::ObjectInstance {
    fn from(wire: ObjectInstance) -> Self {
        Self {
            status:    crate::InstanceStatus::from_wire(&wire.status),
            id:        wire.id,
            object_id: wire.object_id,
            path:      wire.path,
            size:      wire.size,
            created:   wire.created,
        }
    }
}

impl From<&crate::ObjectInstance> for ObjectInstance {
    fn from(instance: &crate::ObjectInstance) -> Self {
        Self {
            id:        instance.id.clone(),
            path:      instance.path.clone(),
            size:      instance.size,
            created:   instance.created.clone(),
            status:    instance.status.as_str().to_string(),
            object_id: instance.object_id.clone(),
        }
    }
}

impl From<Object> for crate::Object {
    fn from(wire: Object) -> Self {
        Self {
            id:        wire.id,
            signature: wire.signature,
            checksum:  wire.checksum,
        }
    }
}

impl From<StorageLocation> for crate::StorageLocationDescriptor {
    fn from(wire: StorageLocation) -> Self {
        Self {
            id:         wire.id,
            alias:      wire.alias,
            kind:       wire.r#type,
            connection: wire.connection,
        }
    }
}

impl From<&crate::NewCheck> for ObjectInstanceCheck {
    fn from(check: &crate::NewCheck) -> Self {
        Self {
            id:                 String::new(),
            object_instance_id: check.instance_id.clone(),
            error:              check.error,
            message:            check.message.clone(),
        }
    }
}
