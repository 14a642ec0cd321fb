//! File-backed record store: one JSON document per collection.

use crate::backend::{Predicate, RecordStore};
use crate::error::Result;
use crate::persist::{atomic_write, load};
use crate::record::{Patch, Record};
use crate::serializer::{JsonSerializer, Serializer};
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A collection persisted as a single JSON array in `<dir>/<file_name>`.
///
/// Every mutation is read-all, transform in memory, write-all. Mutations
/// through the same `FileStore` are serialized by an internal lock; separate
/// processes writing the same file are not coordinated and the last writer
/// wins.
///
/// Use [`open`](Self::open) for pretty-printed output or
/// [`builder`](Self::builder) to pick the format.
pub struct FileStore<T> {
    path: PathBuf,
    serializer: JsonSerializer,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> FileStore<T> {
    /// Store for `<dir>/<file_name>` with pretty-printed JSON. Nothing touches
    /// the disk until the first operation.
    pub fn open(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self::builder(dir, file_name).build()
    }

    /// Start configuring a store. Call [`.build()`](FileStoreBuilder::build)
    /// when ready.
    pub fn builder(dir: impl AsRef<Path>, file_name: &str) -> FileStoreBuilder<T> {
        FileStoreBuilder::new(dir.as_ref().join(file_name))
    }

    /// Path to the backing JSON document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole collection on disk.
    pub fn write_all(&self, records: &[T]) -> Result<()> {
        let bytes = self.serializer.serialize(records)?;
        atomic_write(&self.path, &bytes)?;
        debug!(path = %self.path.display(), records = records.len(), "collection written");
        Ok(())
    }

    fn load(&self) -> Vec<T> {
        load(&self.path, &self.serializer)
    }
}

impl<T: Record> RecordStore<T> for FileStore<T> {
    fn read_all(&self) -> Result<Vec<T>> {
        Ok(self.load())
    }

    fn create(&self, item: T) -> Result<T> {
        let _guard = self.write_lock.lock();
        let mut records = self.load();
        records.push(item.clone());
        self.write_all(&records)?;
        Ok(item)
    }

    fn update(&self, pred: Predicate<'_, T>, patch: &Patch) -> Result<Option<T>> {
        let _guard = self.write_lock.lock();
        let mut records = self.load();
        let Some(idx) = records.iter().position(|r| pred(r)) else {
            return Ok(None);
        };
        let merged = patch.apply(&records[idx])?;
        records[idx] = merged.clone();
        self.write_all(&records)?;
        Ok(Some(merged))
    }

    fn delete(&self, pred: Predicate<'_, T>) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let records = self.load();
        let before = records.len();
        let kept: Vec<T> = records.into_iter().filter(|r| !pred(r)).collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.write_all(&kept)?;
        Ok(true)
    }
}

impl<T> std::fmt::Debug for FileStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("pretty", &self.serializer.is_pretty())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures a [`FileStore`].
///
/// ```rust,no_run
/// use casebook::{FileStore, models::User};
///
/// let users = FileStore::<User>::builder("data", "users.json")
///     .pretty(false)
///     .build();
/// ```
pub struct FileStoreBuilder<T> {
    path: PathBuf,
    pretty: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> FileStoreBuilder<T> {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            pretty: true,
            _marker: PhantomData,
        }
    }

    /// Indent the document (default: `true`).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Finish configuring. Does not touch the disk.
    pub fn build(self) -> FileStore<T> {
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };
        FileStore {
            path: self.path,
            serializer,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for FileStoreBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStoreBuilder")
            .field("path", &self.path)
            .field("pretty", &self.pretty)
            .finish()
    }
}
