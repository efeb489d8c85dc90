//! Identifier pool
//!
//! Supplies globally unique identifiers for new notes. Identifiers are
//! reserved from the remote store in batches to amortize round trips and
//! handed out from a local buffer. Identifiers are never fabricated locally;
//! a collision against the store's identifier space would be a correctness
//! bug, so an unreachable store fails the allocation instead.

use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::remote::RemoteStore;

/// Buffer of pre-allocated identifiers
#[derive(Debug)]
pub struct IdPool {
    buffer: Vec<String>,
    batch_size: usize,
}

impl IdPool {
    /// Create an empty pool that refills `batch_size` identifiers at a time
    pub fn new(batch_size: usize) -> Self {
        Self {
            buffer: Vec::new(),
            batch_size: batch_size.max(1),
        }
    }

    /// Hand out the next identifier, refilling from the store if needed
    pub fn next_id<S: RemoteStore + ?Sized>(&mut self, store: &mut S) -> SyncResult<String> {
        if self.buffer.is_empty() {
            debug!(batch = self.batch_size, "identifier buffer empty, reserving a batch");
            self.buffer = store.allocate_ids(self.batch_size)?;
        }

        self.buffer.pop().ok_or_else(|| {
            SyncError::RemoteUnavailable("identifier allocation returned an empty batch".to_string())
        })
    }

    /// Identifiers still buffered locally
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }
}
