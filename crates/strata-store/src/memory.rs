use std::collections::HashMap;
use std::sync::RwLock;

use strata_objects::Object;
use strata_types::ObjectId;
use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. All objects are held in memory behind a
/// `RwLock` and cloned on read.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Object>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Remove all objects from the store.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all ids in the store.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn insert(&self, id: &ObjectId, object: Object) -> StoreResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        trace!(id = %id.short(), kind = %object.kind(), "insert object");
        map.insert(id.clone(), object);
        Ok(())
    }

    fn fetch(&self, id: &ObjectId) -> StoreResult<Object> {
        let map = self.objects.read().expect("lock poisoned");
        map.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use strata_objects::{Blob, Commit, Label, ObjectError, Tree};
    use strata_types::ContentHasher;

    fn store_blob(store: &InMemoryObjectStore, content: &[u8]) -> ObjectId {
        let blob = Blob::new(content.to_vec());
        let id = blob.id().clone();
        store.insert(&id, Object::Blob(blob)).unwrap();
        id
    }

    #[test]
    fn insert_and_fetch_blob() {
        let store = InMemoryObjectStore::new();
        let id = store_blob(&store, b"hello world");

        let fetched = store.fetch_blob(&id).unwrap();
        assert_eq!(fetched.content(), b"hello world");
    }

    #[test]
    fn fetch_missing_object_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = ObjectId::from_hash([0; 32]);
        let err = store.fetch(&id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn get_missing_object_returns_none() {
        let store = InMemoryObjectStore::new();
        let id = ObjectId::from_hash([0; 32]);
        assert!(store.get(&id).unwrap().is_none());
    }

    #[test]
    fn contains_reflects_inserts() {
        let store = InMemoryObjectStore::new();
        let id = store_blob(&store, b"present");
        assert!(store.contains(&id).unwrap());
        assert!(!store.contains(&ObjectId::from_hash([9; 32])).unwrap());
    }

    #[test]
    fn identical_content_is_deduplicated() {
        let store = InMemoryObjectStore::new();
        let one = store_blob(&store, b"identical");
        let two = store_blob(&store, b"identical");
        assert_eq!(one, two);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_is_idempotent() {
        let store = InMemoryObjectStore::new();
        let blob = Blob::new(b"upsert".to_vec());
        let id = blob.id().clone();

        store.insert(&id, Object::Blob(blob.clone())).unwrap();
        store.insert(&id, Object::Blob(blob)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn labels_are_rewritten_in_place() {
        let store = InMemoryObjectStore::new();
        let name = ObjectId::new("head").unwrap();

        let mut label = Label::new("head", None).unwrap();
        store.insert(&name, Object::Label(label.clone())).unwrap();

        label.set_reference(ObjectId::from_hash([1; 32]));
        store.insert(&name, Object::Label(label.clone())).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.fetch_label(&name).unwrap(), label);
    }

    #[test]
    fn typed_fetch_rejects_wrong_kind() {
        let store = InMemoryObjectStore::new();
        let id = store_blob(&store, b"not a tree");

        let err = store.fetch_tree(&id).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Object(ObjectError::KindMismatch { .. })
        ));
    }

    #[test]
    fn typed_fetch_of_commit_and_tree() {
        let store = InMemoryObjectStore::new();
        let blob_id = store_blob(&store, b"content");

        let mut files = BTreeMap::new();
        files.insert("file.txt".to_string(), blob_id);
        let tree = Tree::new(files, BTreeMap::new());
        let tree_id = tree.id().clone();
        store.insert(&tree_id, Object::Tree(tree)).unwrap();

        let commit = Commit::new(
            "initial",
            tree_id.clone(),
            vec![],
            "alice",
            Utc.with_ymd_and_hms(2014, 1, 15, 12, 0, 0).unwrap(),
        );
        let commit_id = commit.id().clone();
        store.insert(&commit_id, Object::Commit(commit)).unwrap();

        assert_eq!(store.fetch_tree(&tree_id).unwrap().id(), &tree_id);
        assert_eq!(store.fetch_commit(&commit_id).unwrap().tree(), &tree_id);
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryObjectStore::new();
        store_blob(&store, b"a");
        store_blob(&store, b"b");
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn all_ids_is_sorted() {
        let store = InMemoryObjectStore::new();
        store_blob(&store, b"aaa");
        store_blob(&store, b"bbb");
        store_blob(&store, b"ccc");

        let ids = store.all_ids();
        assert_eq!(ids.len(), 3);
        for pair in ids.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let id = store_blob(&store, b"shared data");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = id.clone();
                thread::spawn(move || {
                    let blob = store.fetch_blob(&id).unwrap();
                    assert_eq!(blob.id(), &id);
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread should not panic");
        }
    }

    #[test]
    fn hash_verifies_after_read_back() {
        let store = InMemoryObjectStore::new();
        let id = store_blob(&store, b"verify me");
        let object = store.fetch(&id).unwrap();
        assert!(object.verify().is_ok());
        assert_eq!(
            object.id(),
            &ContentHasher::BLOB.hash(b"verify me")
        );
    }
}
