use thiserror::Error;

/// Transport-layer errors: the "external" class of the taxonomy in
/// ca-core's error docs, surfaced through the repository interface without
/// affecting a running engine.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no record with id {0}")]
    NotFound(String),

    #[error("a record named '{0}' already exists")]
    Conflict(String),

    #[error("compressed chunk is corrupt: {0}")]
    CorruptChunk(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
