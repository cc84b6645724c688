use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use strata_types::{push_field, ContentHasher, ObjectId};

use crate::error::{ObjectError, ObjectResult};
use crate::kind::ObjectKind;

/// Directory snapshot object.
///
/// Maps entry names to blob ids (`files`) and subtree ids (`trees`). The
/// maps are `BTreeMap`s, so the canonical hash payload is sorted by name and
/// the order entries were inserted in can never affect the tree's id.
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct Tree {
    id: ObjectId,
    files: BTreeMap<String, ObjectId>,
    trees: BTreeMap<String, ObjectId>,
}

impl Tree {
    /// Attribute names of the record form, in order.
    pub const FIELDS: &'static [&'static str] = &["id", "files", "trees"];

    /// Create a tree from its entry maps, computing its id.
    pub fn new(files: BTreeMap<String, ObjectId>, trees: BTreeMap<String, ObjectId>) -> Self {
        let id = Self::compute_id(&files, &trees);
        Self { id, files, trees }
    }

    /// Create a tree with an explicit id, verifying it against the entries.
    pub fn verified(
        files: BTreeMap<String, ObjectId>,
        trees: BTreeMap<String, ObjectId>,
        id: ObjectId,
    ) -> ObjectResult<Self> {
        let computed = Self::compute_id(&files, &trees);
        if computed != id {
            return Err(ObjectError::InvalidObject {
                kind: ObjectKind::Tree,
                supplied: id,
                computed,
            });
        }
        Ok(Self { id, files, trees })
    }

    /// Create a tree with an explicit id, skipping hash verification.
    pub fn trusted(
        files: BTreeMap<String, ObjectId>,
        trees: BTreeMap<String, ObjectId>,
        id: ObjectId,
    ) -> Self {
        Self { id, files, trees }
    }

    /// The tree's content-derived id.
    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Name -> blob id entries of this directory level.
    pub fn files(&self) -> &BTreeMap<String, ObjectId> {
        &self.files
    }

    /// Name -> subtree id entries of this directory level.
    pub fn trees(&self) -> &BTreeMap<String, ObjectId> {
        &self.trees
    }

    /// Blob id of a direct file entry.
    pub fn file(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    /// Subtree id of a direct directory entry.
    pub fn subtree(&self, name: &str) -> Option<&ObjectId> {
        self.trees.get(name)
    }

    /// Returns `true` if the tree has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.trees.is_empty()
    }

    /// Recompute the content hash and check it against the stored id.
    pub fn verify(&self) -> ObjectResult<()> {
        let computed = Self::compute_id(&self.files, &self.trees);
        if computed != self.id {
            return Err(ObjectError::InvalidObject {
                kind: ObjectKind::Tree,
                supplied: self.id.clone(),
                computed,
            });
        }
        Ok(())
    }

    fn compute_id(
        files: &BTreeMap<String, ObjectId>,
        trees: &BTreeMap<String, ObjectId>,
    ) -> ObjectId {
        // BTreeMap iterates in key order, which is the canonical form.
        let mut payload = Vec::new();
        for (name, id) in files {
            push_field(&mut payload, b"file");
            push_field(&mut payload, name.as_bytes());
            push_field(&mut payload, id.as_str().as_bytes());
        }
        for (name, id) in trees {
            push_field(&mut payload, b"tree");
            push_field(&mut payload, name.as_bytes());
            push_field(&mut payload, id.as_str().as_bytes());
        }
        ContentHasher::TREE.hash(&payload)
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Tree {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob_id(data: &[u8]) -> ObjectId {
        ContentHasher::BLOB.hash(data)
    }

    fn sample_entries() -> Vec<(String, ObjectId)> {
        vec![
            ("zebra.txt".into(), blob_id(b"z")),
            ("alpha.txt".into(), blob_id(b"a")),
            ("middle.txt".into(), blob_id(b"m")),
        ]
    }

    #[test]
    fn id_is_independent_of_insertion_order() {
        let forward: BTreeMap<_, _> = sample_entries().into_iter().collect();
        let reverse: BTreeMap<_, _> = sample_entries().into_iter().rev().collect();

        let one = Tree::new(forward, BTreeMap::new());
        let two = Tree::new(reverse, BTreeMap::new());
        assert_eq!(one.id(), two.id());
    }

    #[test]
    fn subtree_order_does_not_affect_id() {
        let subtrees = vec![
            ("src".to_string(), blob_id(b"src")),
            ("docs".to_string(), blob_id(b"docs")),
        ];
        let forward: BTreeMap<_, _> = subtrees.iter().cloned().collect();
        let reverse: BTreeMap<_, _> = subtrees.into_iter().rev().collect();

        let one = Tree::new(BTreeMap::new(), forward);
        let two = Tree::new(BTreeMap::new(), reverse);
        assert_eq!(one.id(), two.id());
    }

    #[test]
    fn different_entries_produce_different_ids() {
        let mut files = BTreeMap::new();
        files.insert("a.txt".to_string(), blob_id(b"a"));
        let one = Tree::new(files.clone(), BTreeMap::new());

        files.insert("b.txt".to_string(), blob_id(b"b"));
        let two = Tree::new(files, BTreeMap::new());
        assert_ne!(one.id(), two.id());
    }

    #[test]
    fn file_and_subtree_lookup() {
        let mut files = BTreeMap::new();
        files.insert("readme.md".to_string(), blob_id(b"hi"));
        let mut trees = BTreeMap::new();
        trees.insert("src".to_string(), blob_id(b"fake-tree"));

        let tree = Tree::new(files, trees);
        assert!(tree.file("readme.md").is_some());
        assert!(tree.file("missing").is_none());
        assert!(tree.subtree("src").is_some());
        assert!(!tree.is_empty());
    }

    #[test]
    fn empty_tree_is_empty() {
        let tree = Tree::new(BTreeMap::new(), BTreeMap::new());
        assert!(tree.is_empty());
    }

    #[test]
    fn verified_rejects_mismatched_id() {
        let err = Tree::verified(
            BTreeMap::new(),
            BTreeMap::new(),
            ObjectId::from_hash([9; 32]),
        )
        .unwrap_err();
        assert!(matches!(err, ObjectError::InvalidObject { kind: ObjectKind::Tree, .. }));
    }

    #[test]
    fn verified_accepts_matching_id() {
        let tree = Tree::new(BTreeMap::new(), BTreeMap::new());
        let again =
            Tree::verified(BTreeMap::new(), BTreeMap::new(), tree.id().clone()).unwrap();
        assert_eq!(tree, again);
    }

    #[test]
    fn files_and_trees_are_hashed_separately() {
        let mut files = BTreeMap::new();
        files.insert("x".to_string(), blob_id(b"x"));
        let as_files = Tree::new(files.clone(), BTreeMap::new());
        let as_trees = Tree::new(BTreeMap::new(), files);
        assert_ne!(as_files.id(), as_trees.id());
    }
}
