//! Error handling for sync operations
//!
//! Provides typed errors for the sync layer. Revision conflicts are the only
//! error class the engine resolves by itself (via retry); everything else
//! propagates to the caller as a tagged result.

use thiserror::Error;

use crate::remote::RemoteStoreError;

/// Errors that can occur during sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Remote store could not be reached
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// A revision conflict persisted through the allowed retries
    #[error("Revision conflict on '{key}' not resolved after {attempts} attempts")]
    ConflictExhausted { key: String, attempts: u32 },

    /// A revision token could not be parsed into a sync sequence number
    ///
    /// Fatal: a corrupt revision token means the store and the revision
    /// ledger have diverged.
    #[error("Malformed revision token '{rev}' for '{key}'")]
    MalformedRevision { key: String, rev: String },

    /// A fetched document is missing a required field
    #[error("Malformed document '{id}': {details}")]
    MalformedDocument { id: String, details: String },

    /// The target database was absent at engine construction
    #[error("Store initialization failed: {0}")]
    StoreInit(String),

    /// Any other remote store error
    #[error("Remote store error: {0}")]
    Remote(RemoteStoreError),
}

impl From<RemoteStoreError> for SyncError {
    /// Classify a remote store error into the sync taxonomy
    fn from(err: RemoteStoreError) -> Self {
        match err {
            RemoteStoreError::Unavailable(msg) => SyncError::RemoteUnavailable(msg),
            RemoteStoreError::MissingDatabase(db) => {
                SyncError::StoreInit(format!("database '{}' does not exist", db))
            }
            other => SyncError::Remote(other),
        }
    }
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        let err: SyncError = RemoteStoreError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(err, SyncError::RemoteUnavailable(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_missing_database_classification() {
        let err: SyncError = RemoteStoreError::MissingDatabase("notes".to_string()).into();
        assert!(matches!(err, SyncError::StoreInit(_)));
        assert!(err.to_string().contains("'notes'"));
    }

    #[test]
    fn test_conflict_passthrough() {
        let err: SyncError = RemoteStoreError::Conflict.into();
        assert!(matches!(err, SyncError::Remote(RemoteStoreError::Conflict)));
    }

    #[test]
    fn test_malformed_revision_display() {
        let err = SyncError::MalformedRevision {
            key: "abc".to_string(),
            rev: "not-a-number".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("not-a-number"));
        assert!(msg.contains("abc"));
    }
}
