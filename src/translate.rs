//! Schema translation
//!
//! Bidirectional mapping between the local [`Note`] shape and the remote
//! [`RemoteDocument`] shape. `to_local` is also the single path by which the
//! revision ledger learns of remote revision changes, including ones caused
//! by other writers.

use chrono::Utc;

use crate::error::{SyncError, SyncResult};
use crate::idpool::IdPool;
use crate::ledger::{parse_syncnum, RevisionLedger};
use crate::models::{Note, RemoteDocument};
use crate::remote::RemoteStore;

/// Convert a local note into the document to be written remotely
///
/// A keyed note keeps its identifier and creation time and gets a fresh
/// `modifydate`; a keyless note draws a new identifier from the pool and gets
/// a fresh `createdate` with no `modifydate`. The ledger supplies the `_rev`
/// precondition when one is recorded for the identifier.
pub fn to_remote<S: RemoteStore + ?Sized>(
    note: &Note,
    ledger: &RevisionLedger,
    pool: &mut IdPool,
    store: &mut S,
) -> SyncResult<RemoteDocument> {
    let now = Utc::now();

    let (id, createdate, modifydate) = match &note.key {
        Some(key) => (key.clone(), note.createdate, Some(now)),
        None => (pool.next_id(store)?, Some(now), None),
    };

    let rev = ledger.lookup(&id).map(str::to_string);

    Ok(RemoteDocument {
        id,
        rev,
        content: note.content.clone(),
        tags: note.tags.clone(),
        createdate,
        modifydate,
        syncdate: Some(now),
    })
}

/// Convert a fetched remote document into a local note
///
/// Requires `_rev` and `syncdate` on the document; records the observed
/// revision into the ledger only after the sync sequence number parses, so a
/// malformed token cannot poison future preconditions.
pub fn to_local(doc: &RemoteDocument, ledger: &mut RevisionLedger) -> SyncResult<Note> {
    let rev = doc.rev.as_deref().ok_or_else(|| SyncError::MalformedDocument {
        id: doc.id.clone(),
        details: "missing _rev on a fetched document".to_string(),
    })?;

    let syncdate = doc.syncdate.ok_or_else(|| SyncError::MalformedDocument {
        id: doc.id.clone(),
        details: "missing syncdate".to_string(),
    })?;

    let syncnum = parse_syncnum(&doc.id, rev)?;
    ledger.record(&doc.id, rev);

    // Never leave creation time unset.
    let createdate = doc
        .createdate
        .or(doc.modifydate)
        .unwrap_or_else(Utc::now);
    let modifydate = doc.modifydate.unwrap_or(createdate);

    Ok(Note {
        key: Some(doc.id.clone()),
        content: doc.content.clone(),
        tags: doc.tags.clone(),
        createdate: Some(createdate),
        modifydate: Some(modifydate),
        syncdate: Some(syncdate),
        syncnum: Some(syncnum),
    })
}
