//! Remote store abstraction
//!
//! The sync engine talks to the revisioned document store through the
//! [`RemoteStore`] trait. The concrete transport (HTTP, authentication,
//! request encoding) lives behind this seam and is out of scope here; tests
//! inject an in-memory implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RemoteDocument;

/// Errors reported by a remote store implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteStoreError {
    /// The supplied revision did not match the store's current revision
    #[error("revision precondition did not match the stored document")]
    Conflict,

    /// The addressed document does not exist
    #[error("document not found")]
    NotFound,

    /// The target database does not exist
    #[error("database '{0}' does not exist")]
    MissingDatabase(String),

    /// Transport-level failure
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

/// Identifier and new revision returned by a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub id: String,
    pub rev: String,
}

/// One row of a list response, carrying the full document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRow {
    pub id: String,
    pub doc: RemoteDocument,
}

/// Capability consumed by the sync engine for all remote operations
///
/// Writes carry the document's `_rev` as an optimistic-concurrency
/// precondition; a mismatch must surface as [`RemoteStoreError::Conflict`],
/// never as a silent overwrite.
pub trait RemoteStore {
    /// Verify the target database exists; called once at engine construction
    fn check_database(&self) -> Result<(), RemoteStoreError>;

    /// Fetch a document by identifier; `None` if absent
    fn get(&self, id: &str) -> Result<Option<RemoteDocument>, RemoteStoreError>;

    /// Write a document, honoring its `_rev` precondition
    fn save(&mut self, doc: &RemoteDocument) -> Result<SaveReceipt, RemoteStoreError>;

    /// Delete a document, keyed by identifier and revision
    fn delete(&mut self, id: &str, rev: &str) -> Result<(), RemoteStoreError>;

    /// List documents, optionally capped at `limit`, with full documents
    /// included in each row
    fn list(&self, limit: Option<usize>) -> Result<Vec<DocumentRow>, RemoteStoreError>;

    /// Reserve `count` globally unique identifiers in one round trip
    fn allocate_ids(&mut self, count: usize) -> Result<Vec<String>, RemoteStoreError>;
}
