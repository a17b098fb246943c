//! Reference-counted index snapshots.
//!
//! [`SnapshotManager`] publishes the current [`IndexReader`] snapshot.
//! [`SnapshotManager::acquire`] hands out a [`SnapshotRef`] guard that keeps
//! the snapshot alive; dropping the guard releases it. The manager itself
//! holds one reference to the current snapshot, so a snapshot is only torn
//! down after it has been replaced *and* every outstanding guard is gone.
//!
//! ```
//! use std::sync::Arc;
//! use termvectors::index::{IndexReader, MemoryIndex, SnapshotManager};
//! use termvectors::schema::{KeywordOption, Schema};
//!
//! let schema = Schema::builder("id")
//!     .add_keyword_field("id", KeywordOption::default())
//!     .build();
//! let index = MemoryIndex::builder(schema).build().unwrap();
//! let manager = SnapshotManager::new(Arc::new(index));
//!
//! {
//!     let snapshot = manager.acquire();
//!     assert_eq!(snapshot.reader().max_doc(), 0);
//!     assert_eq!(manager.ref_count(), 2);
//! }
//! assert_eq!(manager.ref_count(), 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::index::reader::IndexReader;

/// One published snapshot and its reference count.
#[derive(Debug)]
struct IndexSnapshot {
    reader: Arc<dyn IndexReader>,
    generation: u64,
    refs: AtomicUsize,
}

impl IndexSnapshot {
    fn incref(&self) {
        self.refs.fetch_add(1, Ordering::AcqRel);
    }

    fn decref(&self) {
        if self.refs.fetch_sub(1, Ordering::AcqRel) == 1 {
            log::debug!("closing index snapshot generation {}", self.generation);
            if let Err(e) = self.reader.close() {
                log::warn!(
                    "failed to close index snapshot generation {}: {e}",
                    self.generation
                );
            }
        }
    }
}

/// Publishes index snapshots and hands out scoped references to them.
#[derive(Debug)]
pub struct SnapshotManager {
    current: RwLock<Arc<IndexSnapshot>>,
    next_generation: AtomicU64,
}

impl SnapshotManager {
    /// Create a manager publishing `reader` as generation 0.
    pub fn new(reader: Arc<dyn IndexReader>) -> Self {
        Self {
            current: RwLock::new(Arc::new(IndexSnapshot {
                reader,
                generation: 0,
                refs: AtomicUsize::new(1),
            })),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Acquire a reference to the current snapshot.
    pub fn acquire(&self) -> SnapshotRef {
        let current = self.current.read();
        current.incref();
        SnapshotRef {
            snapshot: Arc::clone(&current),
        }
    }

    /// Publish a new snapshot and release the manager's reference to the old one.
    ///
    /// Returns the generation of the new snapshot.
    pub fn replace(&self, reader: Arc<dyn IndexReader>) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let fresh = Arc::new(IndexSnapshot {
            reader,
            generation,
            refs: AtomicUsize::new(1),
        });
        let old = std::mem::replace(&mut *self.current.write(), fresh);
        old.decref();
        generation
    }

    /// Reference count of the current snapshot, including the manager's own.
    pub fn ref_count(&self) -> usize {
        self.current.read().refs.load(Ordering::Acquire)
    }

    /// Generation of the current snapshot.
    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }
}

impl Drop for SnapshotManager {
    fn drop(&mut self) {
        self.current.read().decref();
    }
}

/// Scoped reference to a snapshot. Released on drop.
#[derive(Debug)]
pub struct SnapshotRef {
    snapshot: Arc<IndexSnapshot>,
}

impl SnapshotRef {
    pub fn reader(&self) -> &dyn IndexReader {
        self.snapshot.reader.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.snapshot.generation
    }

    /// Current reference count of this snapshot.
    pub fn ref_count(&self) -> usize {
        self.snapshot.refs.load(Ordering::Acquire)
    }
}

impl Clone for SnapshotRef {
    fn clone(&self) -> Self {
        self.snapshot.incref();
        Self {
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl Drop for SnapshotRef {
    fn drop(&mut self) {
        self.snapshot.decref();
    }
}
