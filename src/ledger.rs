//! Revision ledger
//!
//! Process-local mapping from note key to the last remote revision token this
//! engine observed for it. The recorded revision becomes the precondition on
//! the next write of the same key. Entries are only written after a
//! successful read or write and are never evicted.

use std::collections::HashMap;

use crate::error::{SyncError, SyncResult};

/// Last known remote revision per note key
#[derive(Debug, Default)]
pub struct RevisionLedger {
    revisions: HashMap<String, String>,
}

impl RevisionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed revision for a key, superseding any earlier one
    ///
    /// Callers must only pass revisions they just observed from the store;
    /// last-write-wins relies on that.
    pub fn record(&mut self, key: &str, rev: &str) {
        self.revisions.insert(key.to_string(), rev.to_string());
    }

    /// Look up the last known revision for a key
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.revisions.get(key).map(String::as_str)
    }

    /// Number of keys with a recorded revision
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}

/// Derive the sync sequence number from a revision token
///
/// The numeric prefix up to the first `-` is the store's generation counter.
/// A token that does not start with a number means the store and the ledger
/// have diverged, which is fatal.
pub fn parse_syncnum(key: &str, rev: &str) -> SyncResult<u64> {
    let prefix = rev.split('-').next().unwrap_or_default();
    prefix
        .parse::<u64>()
        .map_err(|_| SyncError::MalformedRevision {
            key: key.to_string(),
            rev: rev.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_lookup() {
        let mut ledger = RevisionLedger::new();
        assert!(ledger.lookup("abc").is_none());

        ledger.record("abc", "1-aaa");
        assert_eq!(ledger.lookup("abc"), Some("1-aaa"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_newer_revision_supersedes() {
        let mut ledger = RevisionLedger::new();
        ledger.record("abc", "1-aaa");
        ledger.record("abc", "2-bbb");
        assert_eq!(ledger.lookup("abc"), Some("2-bbb"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut ledger = RevisionLedger::new();
        ledger.record("abc", "1-aaa");
        ledger.record("def", "4-ddd");
        assert_eq!(ledger.lookup("abc"), Some("1-aaa"));
        assert_eq!(ledger.lookup("def"), Some("4-ddd"));
    }

    #[test]
    fn test_parse_syncnum() {
        assert_eq!(parse_syncnum("k", "1-abc123").unwrap(), 1);
        assert_eq!(parse_syncnum("k", "42-deadbeef").unwrap(), 42);
        // A bare generation with no suffix still parses
        assert_eq!(parse_syncnum("k", "7").unwrap(), 7);
    }

    #[test]
    fn test_parse_syncnum_malformed() {
        let err = parse_syncnum("k", "garbage-1").unwrap_err();
        assert!(matches!(err, SyncError::MalformedRevision { .. }));

        let err = parse_syncnum("k", "").unwrap_err();
        assert!(matches!(err, SyncError::MalformedRevision { .. }));
    }
}
