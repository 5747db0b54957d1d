//! Per-document write locks.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<String, Arc<Mutex<()>>>;

/// One async mutex per document, created on first use and dropped from
/// the table once nobody holds or waits for it.
///
/// Writers on the same document are serialized; writers on different
/// documents never wait on each other.
#[derive(Debug, Clone, Default)]
pub struct DocumentLocks {
    locks: Arc<LockTable>,
}

/// Holds a document's write lock until dropped.
#[derive(Debug)]
pub struct DocumentLock {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockTable>,
    doc_id: String,
}

impl DocumentLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for the lock of `doc_id` and holds it until the guard drops.
    pub async fn acquire(&self, doc_id: &str) -> DocumentLock {
        let lock = self
            .locks
            .entry(doc_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        DocumentLock {
            guard: Some(lock.lock_owned().await),
            locks: self.locks.clone(),
            doc_id: doc_id.to_string(),
        }
    }

    /// Number of documents currently locked or awaited.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no document is locked or awaited.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters hold their own clone, so a count of one means the table
        // entry is the last reference.
        self.locks
            .remove_if(&self.doc_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
