#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("invalid inventory endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("cannot connect to inventory at {endpoint}: {source}")]
    Connect {
        endpoint: String,
        source:   tonic::transport::Error,
    },

    #[error("inventory service unavailable: {0}")]
    Unavailable(String),

    #[error("{method} failed: {status}")]
    Rpc {
        method: &'static str,
        status: Box<tonic::Status>,
    },

    #[error("{method} was rejected by the inventory")]
    Rejected { method: &'static str },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

pub type Result<T> = std::result::Result<T, InventoryError>;
