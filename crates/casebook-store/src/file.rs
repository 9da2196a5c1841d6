//! File-backed record store
//!
//! Saves go through a sibling temp file that is synced and then renamed over
//! the target, so a reader never sees a half-written array.
//!
//! Records are decoded one at a time. A record that does not decode is kept
//! as raw JSON and written back after the decoded records on the next save,
//! so one malformed entry never costs the rest of the collection.

use crate::error::StoreError;
use crate::RecordStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// JSON array of `T` stored in a single file
pub struct JsonFileStore<T> {
    path: PathBuf,
    /// Entries from the last load that did not decode as `T`
    undecoded: Mutex<Vec<Value>>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    /// Store backed by `path`; the file is created on first save
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            undecoded: Mutex::new(Vec::new()),
            _records: PhantomData,
        }
    }

    /// Backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("records");
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_file_name(format!(".{name}.tmp.{}.{seq}", std::process::id()))
    }
}

impl<T: DeserializeOwned> JsonFileStore<T> {
    async fn read_records(&self) -> (Vec<T>, Vec<Value>) {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "collection file absent, starting empty");
                return (Vec::new(), Vec::new());
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "collection unreadable, treating as empty");
                return (Vec::new(), Vec::new());
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return (Vec::new(), Vec::new());
        }

        let entries: Vec<Value> = match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "collection is not a JSON array, treating as empty");
                return (Vec::new(), Vec::new());
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut undecoded = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            match T::deserialize(&entry) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), index, error = %e, "record kept undecoded");
                    undecoded.push(entry);
                }
            }
        }
        (records, undecoded)
    }
}

impl<T> fmt::Debug for JsonFileStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .field("undecoded", &self.undecoded.lock().len())
            .finish()
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self) -> Vec<T> {
        let (records, undecoded) = self.read_records().await;
        *self.undecoded.lock() = undecoded;
        records
    }

    async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let mut entries = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        entries.extend(self.undecoded.lock().iter().cloned());
        let bytes = serde_json::to_vec_pretty(&entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.tmp_path();
        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(&bytes).await?;
            file.sync_all().await
        }
        .await;
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(&tmp, e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(&self.path, e));
        }

        tracing::debug!(path = %self.path.display(), records = entries.len(), "collection saved");
        Ok(())
    }
}
