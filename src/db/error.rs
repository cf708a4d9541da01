use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Operation on table '{table}' has no conflict key")]
    MissingConflictKey { table: String },
}
