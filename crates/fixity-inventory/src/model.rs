use std::fmt;

/// Verification state of one stored copy, as of the most recent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstanceStatus {
    #[default]
    Unknown,
    Ok,
    Error,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Unknown => "unknown",
            InstanceStatus::Ok => "ok",
            InstanceStatus::Error => "error",
        }
    }

    /// Parse the inventory's status text. Anything unrecognized is `Unknown`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "ok" => InstanceStatus::Ok,
            "error" => InstanceStatus::Error,
            _ => InstanceStatus::Unknown,
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// An archived logical unit. Owned by the inventory, read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Object {
    pub id:        String,
    pub signature: String,
    /// Expected digest recorded at ingestion, hex encoded.
    pub checksum:  String,
}

/// One physical copy of an [`Object`] at a storage location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectInstance {
    pub id:        String,
    pub object_id: String,
    pub path:      String,
    pub status:    InstanceStatus,
    pub size:      i64,
    pub created:   String,
}

impl ObjectInstance {
    /// Copy of this instance carrying `status`.
    pub fn with_status(&self, status: InstanceStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Where an instance's bytes live. `connection` is an opaque, backend-specific
/// JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageLocationDescriptor {
    pub id:         String,
    pub alias:      String,
    pub kind:       String,
    pub connection: String,
}

/// An append-only audit entry for one verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheck {
    pub instance_id: String,
    pub error:       bool,
    pub message:     String,
}

impl NewCheck {
    pub fn passed(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            error:       false,
            message:     String::new(),
        }
    }

    pub fn failed(instance_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            error:       true,
            message:     message.into(),
        }
    }
}
