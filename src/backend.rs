//! The record store contract.
//!
//! Implement [`RecordStore`] to bring your own medium. Both shipped backends,
//! [`FileStore`](crate::FileStore) and [`RemoteTable`](crate::RemoteTable),
//! honor the same contract so callers never need to know which one is active.

use crate::error::Result;
use crate::record::{Patch, Record};

/// Caller-supplied test over a single record.
pub type Predicate<'a, T> = &'a dyn Fn(&T) -> bool;

/// A collection of records of one type over some durable medium.
///
/// Predicates run in the caller's address space; nothing is translated into a
/// backend query language. Ordering follows [`read_all`](Self::read_all).
///
/// Failure behavior depends on the backend. The file backend absorbs read
/// failures into an empty collection; the remote backend surfaces every
/// non-success response as an error. Writes fail loudly on both.
pub trait RecordStore<T: Record>: Send + Sync {
    /// Every record in the collection, in the backend's materialized order.
    fn read_all(&self) -> Result<Vec<T>>;

    /// First record matching `pred`, or `None`.
    fn find_one(&self, pred: Predicate<'_, T>) -> Result<Option<T>> {
        Ok(self.read_all()?.into_iter().find(|r| pred(r)))
    }

    /// All records matching `pred`, preserving `read_all` order.
    fn find_many(&self, pred: Predicate<'_, T>) -> Result<Vec<T>> {
        Ok(self.read_all()?.into_iter().filter(|r| pred(r)).collect())
    }

    /// Append a fully formed record and return the backend's copy of it.
    fn create(&self, item: T) -> Result<T>;

    /// Merge `patch` over the first record matching `pred` and persist it.
    /// Returns the merged record, or `None` (and writes nothing) when no record
    /// matches.
    fn update(&self, pred: Predicate<'_, T>, patch: &Patch) -> Result<Option<T>>;

    /// Remove every record matching `pred`. Returns `true` if anything went.
    fn delete(&self, pred: Predicate<'_, T>) -> Result<bool>;
}

impl<T: Record, S: RecordStore<T> + ?Sized> RecordStore<T> for Box<S> {
    fn read_all(&self) -> Result<Vec<T>> {
        (**self).read_all()
    }

    fn find_one(&self, pred: Predicate<'_, T>) -> Result<Option<T>> {
        (**self).find_one(pred)
    }

    fn find_many(&self, pred: Predicate<'_, T>) -> Result<Vec<T>> {
        (**self).find_many(pred)
    }

    fn create(&self, item: T) -> Result<T> {
        (**self).create(item)
    }

    fn update(&self, pred: Predicate<'_, T>, patch: &Patch) -> Result<Option<T>> {
        (**self).update(pred, patch)
    }

    fn delete(&self, pred: Predicate<'_, T>) -> Result<bool> {
        (**self).delete(pred)
    }
}
