/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Keys double as file names and are restricted to `[A-Za-z0-9_-]`.
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}
