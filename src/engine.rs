//! Sync engine
//!
//! Orchestrates create/read/update/delete/list operations against the remote
//! store, applying the revision ledger and schema translation, resolving
//! revision conflicts by retry, and shaping responses (content omission on
//! quiet updates and in list results).
//!
//! The engine itself is stateless per operation; the ledger and identifier
//! pool are the only mutable state, and they are private to one engine
//! instance. Methods take `&mut self`, so sharing an engine across threads
//! requires external serialization.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{SyncError, SyncResult};
use crate::idpool::IdPool;
use crate::ledger::RevisionLedger;
use crate::models::{NewNote, Note, Status};
use crate::remote::{RemoteStore, RemoteStoreError};
use crate::translate;

/// Synchronization engine for one remote document collection
#[derive(Debug)]
pub struct SyncEngine<S: RemoteStore> {
    store: S,
    ledger: RevisionLedger,
    pool: IdPool,
    config: Config,
}

impl<S: RemoteStore> SyncEngine<S> {
    /// Create an engine with default configuration
    ///
    /// Verifies the target database exists before any operation; absence is
    /// fatal here, not at first use.
    pub fn new(store: S) -> SyncResult<Self> {
        Self::with_config(store, Config::default())
    }

    /// Create an engine with a specific configuration
    pub fn with_config(store: S, config: Config) -> SyncResult<Self> {
        store
            .check_database()
            .map_err(|e| SyncError::StoreInit(e.to_string()))?;

        Ok(Self {
            pool: IdPool::new(config.id_batch_size),
            ledger: RevisionLedger::new(),
            store,
            config,
        })
    }

    /// Revisions observed so far (one entry per key touched by this engine)
    pub fn ledger(&self) -> &RevisionLedger {
        &self.ledger
    }

    /// Fetch a single note by key
    ///
    /// An absent key is a normal negative result, not an error.
    pub fn get_note(&mut self, key: &str) -> SyncResult<(Option<Note>, Status)> {
        match self.store.get(key)? {
            Some(doc) => {
                let note = translate::to_local(&doc, &mut self.ledger)?;
                Ok((Some(note), Status::Ok))
            }
            None => {
                debug!(key, "note not found remotely");
                Ok((None, Status::NotFound))
            }
        }
    }

    /// List notes, metadata only
    ///
    /// Content is stripped from every result; callers fetch it lazily via
    /// [`get_note`](Self::get_note).
    pub fn get_note_list(&mut self, limit: Option<usize>) -> SyncResult<(Vec<Note>, Status)> {
        let rows = self.store.list(limit)?;
        debug!(count = rows.len(), "listing remote notes");

        let mut notes = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut note = translate::to_local(&row.doc, &mut self.ledger)?;
            note.content = None;
            notes.push(note);
        }

        Ok((notes, Status::Ok))
    }

    /// Create a brand-new note
    ///
    /// Delegates to the update path with a keyless draft; the identifier is
    /// drawn from the pool during translation.
    pub fn add_note(&mut self, input: NewNote) -> SyncResult<(Note, Status)> {
        let draft = input.into_draft();
        self.update_note(&draft)
    }

    /// Write a note to the remote store
    ///
    /// On a revision conflict the engine refreshes the precondition from the
    /// store's current document and retries the save exactly once, last
    /// writer wins. After a successful save the note is re-fetched so the
    /// returned state is what the store actually persisted.
    ///
    /// A quiet update (pre-existing key, no conflict) omits `content` from
    /// the returned note; the caller already holds what it just wrote. The
    /// trigger is conflict-occurred, not a content diff.
    pub fn update_note(&mut self, note: &Note) -> SyncResult<(Note, Status)> {
        let is_update = note.key.is_some();
        let mut doc = translate::to_remote(note, &self.ledger, &mut self.pool, &mut self.store)?;
        let mut changed = false;

        match self.store.save(&doc) {
            Ok(receipt) => {
                debug!(id = %receipt.id, rev = %receipt.rev, "saved note");
            }
            Err(RemoteStoreError::Conflict) => {
                warn!(id = %doc.id, "save rejected by revision precondition, retrying");
                match self.store.get(&doc.id)? {
                    Some(current) => doc.rev = current.rev,
                    // Deleted out from under us; retry as a fresh write
                    // rather than reporting a stale-revision conflict.
                    None => doc.rev = None,
                }

                match self.store.save(&doc) {
                    Ok(receipt) => {
                        debug!(id = %receipt.id, rev = %receipt.rev, "retried save succeeded");
                        changed = true;
                    }
                    Err(RemoteStoreError::Conflict) => {
                        return Err(SyncError::ConflictExhausted {
                            key: doc.id,
                            attempts: 2,
                        });
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        }

        // Authoritative post-write state: syncnum and timestamps must reflect
        // what the store persisted, not what we optimistically assumed.
        let (fetched, _) = self.get_note(&doc.id)?;
        let mut result = fetched.ok_or_else(|| SyncError::MalformedDocument {
            id: doc.id.clone(),
            details: "document missing after a successful save".to_string(),
        })?;

        if is_update && !changed {
            result.content = None;
        }

        let status = if changed { Status::Conflicted } else { Status::Ok };
        Ok((result, status))
    }

    /// Delete a note by key
    ///
    /// An absent key succeeds trivially. Conflicting deletes are retried
    /// with a refreshed revision, bounded by `delete_retry_limit` with linear
    /// backoff.
    pub fn delete_note(&mut self, key: &str) -> SyncResult<Status> {
        let limit = self.config.delete_retry_limit.max(1);

        for attempt in 1..=limit {
            let Some(doc) = self.store.get(key)? else {
                debug!(key, "nothing to delete");
                return Ok(Status::Ok);
            };

            let rev = doc.rev.as_deref().ok_or_else(|| SyncError::MalformedDocument {
                id: doc.id.clone(),
                details: "missing _rev on a fetched document".to_string(),
            })?;

            match self.store.delete(&doc.id, rev) {
                Ok(()) => {
                    info!(key, "deleted remote note");
                    return Ok(Status::Ok);
                }
                Err(RemoteStoreError::Conflict) => {
                    warn!(key, attempt, "delete rejected by revision precondition");
                    thread::sleep(Duration::from_millis(
                        self.config.retry_backoff_ms * u64::from(attempt),
                    ));
                }
                // Raced with another deleter; the outcome is what we wanted.
                Err(RemoteStoreError::NotFound) => return Ok(Status::Ok),
                Err(e) => return Err(e.into()),
            }
        }

        Err(SyncError::ConflictExhausted {
            key: key.to_string(),
            attempts: limit,
        })
    }
}
