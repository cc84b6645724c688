use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strata_types::{push_field, ContentHasher, ObjectId};

use crate::error::{ObjectError, ObjectResult};
use crate::kind::ObjectKind;

/// A point in history.
///
/// References a root [`Tree`] snapshot and an ordered list of parent commit
/// ids: empty for a root commit, more than one for a merge commit. The
/// parent ids participate in the content hash, so a commit's id pins its
/// entire ancestry.
///
/// [`Tree`]: crate::tree::Tree
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct Commit {
    id: ObjectId,
    message: String,
    tree: ObjectId,
    parents: Vec<ObjectId>,
    author: String,
    date: DateTime<Utc>,
}

impl Commit {
    /// Attribute names of the record form, in order.
    pub const FIELDS: &'static [&'static str] =
        &["id", "message", "tree", "parents", "author", "date"];

    /// Create a commit from its fields, computing its id.
    pub fn new(
        message: impl Into<String>,
        tree: ObjectId,
        parents: Vec<ObjectId>,
        author: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        let message = message.into();
        let author = author.into();
        let id = Self::compute_id(&message, &tree, &parents, &author, &date);
        Self {
            id,
            message,
            tree,
            parents,
            author,
            date,
        }
    }

    /// Create a commit with an explicit id, verifying it against the fields.
    pub fn verified(
        message: impl Into<String>,
        tree: ObjectId,
        parents: Vec<ObjectId>,
        author: impl Into<String>,
        date: DateTime<Utc>,
        id: ObjectId,
    ) -> ObjectResult<Self> {
        let message = message.into();
        let author = author.into();
        let computed = Self::compute_id(&message, &tree, &parents, &author, &date);
        if computed != id {
            return Err(ObjectError::InvalidObject {
                kind: ObjectKind::Commit,
                supplied: id,
                computed,
            });
        }
        Ok(Self {
            id,
            message,
            tree,
            parents,
            author,
            date,
        })
    }

    /// Create a commit with an explicit id, skipping hash verification.
    pub fn trusted(
        message: impl Into<String>,
        tree: ObjectId,
        parents: Vec<ObjectId>,
        author: impl Into<String>,
        date: DateTime<Utc>,
        id: ObjectId,
    ) -> Self {
        Self {
            id,
            message: message.into(),
            tree,
            parents,
            author: author.into(),
            date,
        }
    }

    /// The commit's content-derived id.
    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// The commit message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Id of the root tree snapshot.
    pub fn tree(&self) -> &ObjectId {
        &self.tree
    }

    /// Ordered parent commit ids.
    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// The commit author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// When the commit was created.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns `true` if the commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` if the commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Recompute the content hash and check it against the stored id.
    pub fn verify(&self) -> ObjectResult<()> {
        let computed =
            Self::compute_id(&self.message, &self.tree, &self.parents, &self.author, &self.date);
        if computed != self.id {
            return Err(ObjectError::InvalidObject {
                kind: ObjectKind::Commit,
                supplied: self.id.clone(),
                computed,
            });
        }
        Ok(())
    }

    fn compute_id(
        message: &str,
        tree: &ObjectId,
        parents: &[ObjectId],
        author: &str,
        date: &DateTime<Utc>,
    ) -> ObjectId {
        let mut payload = Vec::new();
        push_field(&mut payload, message.as_bytes());
        push_field(&mut payload, tree.as_str().as_bytes());
        for parent in parents {
            push_field(&mut payload, parent.as_str().as_bytes());
        }
        push_field(&mut payload, author.as_bytes());
        push_field(&mut payload, date.to_rfc3339().as_bytes());
        ContentHasher::COMMIT.hash(&payload)
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Commit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 1, 15, 12, 0, 0).unwrap()
    }

    fn tree_id() -> ObjectId {
        ContentHasher::TREE.hash(b"tree")
    }

    #[test]
    fn same_fields_produce_same_id() {
        let one = Commit::new("msg", tree_id(), vec![], "alice", date());
        let two = Commit::new("msg", tree_id(), vec![], "alice", date());
        assert_eq!(one.id(), two.id());
        assert_eq!(one, two);
    }

    #[test]
    fn parents_participate_in_the_id() {
        let root = Commit::new("root", tree_id(), vec![], "alice", date());
        let child = Commit::new("root", tree_id(), vec![root.id().clone()], "alice", date());
        assert_ne!(root.id(), child.id());
    }

    #[test]
    fn parent_order_participates_in_the_id() {
        let a = ContentHasher::COMMIT.hash(b"a");
        let b = ContentHasher::COMMIT.hash(b"b");
        let one = Commit::new("merge", tree_id(), vec![a.clone(), b.clone()], "alice", date());
        let two = Commit::new("merge", tree_id(), vec![b, a], "alice", date());
        assert_ne!(one.id(), two.id());
    }

    #[test]
    fn verified_accepts_matching_id() {
        let commit = Commit::new("msg", tree_id(), vec![], "bob", date());
        let again = Commit::verified(
            "msg",
            tree_id(),
            vec![],
            "bob",
            date(),
            commit.id().clone(),
        )
        .unwrap();
        assert_eq!(commit, again);
    }

    #[test]
    fn verified_rejects_mismatched_id() {
        let err = Commit::verified(
            "msg",
            tree_id(),
            vec![],
            "bob",
            date(),
            ObjectId::from_hash([3; 32]),
        )
        .unwrap_err();
        assert!(matches!(err, ObjectError::InvalidObject { kind: ObjectKind::Commit, .. }));
    }

    #[test]
    fn root_and_merge_predicates() {
        let root = Commit::new("root", tree_id(), vec![], "a", date());
        assert!(root.is_root());
        assert!(!root.is_merge());

        let merge = Commit::new(
            "merge",
            tree_id(),
            vec![root.id().clone(), ContentHasher::COMMIT.hash(b"other")],
            "a",
            date(),
        );
        assert!(!merge.is_root());
        assert!(merge.is_merge());
    }
}
