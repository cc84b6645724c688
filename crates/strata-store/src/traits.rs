use std::sync::Arc;

use strata_objects::{Blob, Commit, Label, Object, Tree};
use strata_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - `insert` is an idempotent upsert: overwriting an id with identical
///   content is observationally a no-op, and hashed objects only ever carry
///   identical content for the same id.
/// - Hashed objects are immutable once written; only labels are rewritten
///   in place under their fixed name.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Write an object under the given id (idempotent upsert).
    fn insert(&self, id: &ObjectId, object: Object) -> StoreResult<()>;

    /// Read an object by id, failing with [`StoreError::NotFound`] when
    /// absent.
    fn fetch(&self, id: &ObjectId) -> StoreResult<Object>;

    /// Check whether an object exists in the store.
    fn contains(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object by id, `None` when absent.
    fn get(&self, id: &ObjectId) -> StoreResult<Option<Object>> {
        match self.fetch(id) {
            Ok(object) => Ok(Some(object)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Fetch an object expected to be a blob.
    fn fetch_blob(&self, id: &ObjectId) -> StoreResult<Blob> {
        Ok(self.fetch(id)?.into_blob()?)
    }

    /// Fetch an object expected to be a tree.
    fn fetch_tree(&self, id: &ObjectId) -> StoreResult<Tree> {
        Ok(self.fetch(id)?.into_tree()?)
    }

    /// Fetch an object expected to be a commit.
    fn fetch_commit(&self, id: &ObjectId) -> StoreResult<Commit> {
        Ok(self.fetch(id)?.into_commit()?)
    }

    /// Fetch an object expected to be a label.
    fn fetch_label(&self, id: &ObjectId) -> StoreResult<Label> {
        Ok(self.fetch(id)?.into_label()?)
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn insert(&self, id: &ObjectId, object: Object) -> StoreResult<()> {
        (**self).insert(id, object)
    }

    fn fetch(&self, id: &ObjectId) -> StoreResult<Object> {
        (**self).fetch(id)
    }

    fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        (**self).contains(id)
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for Arc<S> {
    fn insert(&self, id: &ObjectId, object: Object) -> StoreResult<()> {
        (**self).insert(id, object)
    }

    fn fetch(&self, id: &ObjectId) -> StoreResult<Object> {
        (**self).fetch(id)
    }

    fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        (**self).contains(id)
    }
}
