//! In-memory record store

use crate::error::StoreError;
use crate::RecordStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Collection held in process memory
///
/// Behaves like [`crate::JsonFileStore`] without touching disk: `load` hands
/// out a copy, `save` replaces the whole collection.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl<T: Clone> MemoryStore<T> {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Store seeded with `records`
    #[inline]
    #[must_use]
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
            fail_saves: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    /// Make every later save fail
    #[inline]
    #[must_use]
    pub fn failing(self) -> Self {
        self.fail_saves.store(true, Ordering::SeqCst);
        self
    }

    /// Copy of the current collection
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.records.lock().clone()
    }

    /// Number of successful saves so far
    #[inline]
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn load(&self) -> Vec<T> {
        self.snapshot()
    }

    async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is read-only".to_string()));
        }
        *self.records.lock() = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
