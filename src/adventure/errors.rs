use thiserror::Error;

/// Errors that can arise while decoding or persisting adventure snapshots.
///
/// Gameplay outcomes (blocked moves, nothing to grab, ...) are never errors;
/// they are reported as narrative lines.
#[derive(Debug, Error)]
pub enum AdventureError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around JSON snapshot encoding errors.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, file locks, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a stored snapshot has an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// Snapshot decoded but does not describe a playable world.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("invalid session id: {0}")]
    InvalidSessionId(String),
}

impl AdventureError {
    /// True when the stored data itself is unusable and the session should be
    /// reinitialized rather than failing the request.
    pub fn is_corrupt_snapshot(&self) -> bool {
        matches!(
            self,
            AdventureError::Bincode(_)
                | AdventureError::Json(_)
                | AdventureError::SchemaMismatch { .. }
                | AdventureError::InvalidSnapshot(_)
        )
    }
}
