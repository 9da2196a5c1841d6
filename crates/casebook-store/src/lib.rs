//! Casebook record stores
//!
//! Every collection is one JSON array held in one file. Callers load the
//! whole collection, modify it in memory, and save the whole collection back.
//!
//! There is no locking between load and save: two callers racing on the same
//! collection can lose an update, the later save winning.
//!
//! - [`RecordStore`]: load/save seam injected into services
//! - [`JsonFileStore`]: file-backed store with atomic replacement
//! - [`MemoryStore`]: in-process store for tests

#![warn(unreachable_pub)]

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Whole-collection load/save
#[async_trait]
pub trait RecordStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Load every record
    ///
    /// Never fails. A missing or unreadable backing collection is empty.
    async fn load(&self) -> Vec<T>;

    /// Replace the collection with `records`
    ///
    /// Readers see either the previous collection or the new one, never a
    /// partial write.
    async fn save(&self, records: &[T]) -> Result<(), StoreError>;
}

/// File names of the three collections under a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPaths {
    /// Individual case studies
    pub individual: PathBuf,
    /// Focus-group submissions
    pub focus_group: PathBuf,
    /// Registered users
    pub users: PathBuf,
}

impl CollectionPaths {
    /// Standard layout under `data_dir`
    #[must_use]
    pub fn under(data_dir: &Path) -> Self {
        Self {
            individual: data_dir.join("individual_case_studies.json"),
            focus_group: data_dir.join("focus_group_case_studies.json"),
            users: data_dir.join("users.json"),
        }
    }
}
