use serde::{Deserialize, Serialize};
use strata_types::ObjectId;

use crate::blob::Blob;
use crate::commit::Commit;
use crate::error::{ObjectError, ObjectResult};
use crate::kind::ObjectKind;
use crate::label::Label;
use crate::tree::Tree;

/// Any storable object.
///
/// The sum type is what object stores traffic in: a store does not interpret
/// its objects beyond the kind tag. Use the `as_*`/`into_*` accessors to get
/// back at the concrete variant; a wrong expectation is a
/// [`ObjectError::KindMismatch`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Label(Label),
}

/// Whether a record's ids are re-checked against the recomputed content hash
/// when rebuilding objects.
///
/// `Trust` is the explicit opt-out for loading objects that were verified
/// when first stored, e.g. while walking ancestors, where re-hashing every
/// object again would be wasted work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verification {
    Verify,
    Trust,
}

impl Object {
    /// The object's store id: the content hash for hashed kinds, the name
    /// for labels.
    pub fn id(&self) -> &ObjectId {
        match self {
            Self::Blob(blob) => blob.id(),
            Self::Tree(tree) => tree.id(),
            Self::Commit(commit) => commit.id(),
            Self::Label(label) => label.name(),
        }
    }

    /// The object's kind tag.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
            Self::Label(_) => ObjectKind::Label,
        }
    }

    /// Attribute names of a kind's record form, in order.
    pub fn fields(kind: ObjectKind) -> &'static [&'static str] {
        match kind {
            ObjectKind::Blob => Blob::FIELDS,
            ObjectKind::Tree => Tree::FIELDS,
            ObjectKind::Commit => Commit::FIELDS,
            ObjectKind::Label => Label::FIELDS,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Self::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Self::Commit(commit) => Some(commit),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&Label> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Unwrap as a blob, or fail with [`ObjectError::KindMismatch`].
    pub fn into_blob(self) -> ObjectResult<Blob> {
        match self {
            Self::Blob(blob) => Ok(blob),
            other => Err(mismatch(ObjectKind::Blob, &other)),
        }
    }

    /// Unwrap as a tree, or fail with [`ObjectError::KindMismatch`].
    pub fn into_tree(self) -> ObjectResult<Tree> {
        match self {
            Self::Tree(tree) => Ok(tree),
            other => Err(mismatch(ObjectKind::Tree, &other)),
        }
    }

    /// Unwrap as a commit, or fail with [`ObjectError::KindMismatch`].
    pub fn into_commit(self) -> ObjectResult<Commit> {
        match self {
            Self::Commit(commit) => Ok(commit),
            other => Err(mismatch(ObjectKind::Commit, &other)),
        }
    }

    /// Unwrap as a label, or fail with [`ObjectError::KindMismatch`].
    pub fn into_label(self) -> ObjectResult<Label> {
        match self {
            Self::Label(label) => Ok(label),
            other => Err(mismatch(ObjectKind::Label, &other)),
        }
    }

    /// Recompute the content hash of a hashed object and check it against
    /// the stored id. Labels always verify.
    pub fn verify(&self) -> ObjectResult<()> {
        match self {
            Self::Blob(blob) => blob.verify(),
            Self::Tree(tree) => tree.verify(),
            Self::Commit(commit) => commit.verify(),
            Self::Label(_) => Ok(()),
        }
    }

    /// Serialize to the kind-tagged record form used by persistence
    /// backends.
    pub fn to_record(&self) -> ObjectResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| ObjectError::Serialization(e.to_string()))
    }

    /// Rebuild an object from its record form.
    ///
    /// With [`Verification::Verify`] the record's id is checked against the
    /// recomputed content hash and an [`ObjectError::InvalidObject`] is
    /// returned on mismatch.
    pub fn from_record(record: serde_json::Value, verification: Verification) -> ObjectResult<Self> {
        let object: Self =
            serde_json::from_value(record).map_err(|e| ObjectError::Serialization(e.to_string()))?;
        if verification == Verification::Verify {
            object.verify()?;
        }
        Ok(object)
    }
}

fn mismatch(expected: ObjectKind, actual: &Object) -> ObjectError {
    ObjectError::KindMismatch {
        expected,
        actual: actual.kind(),
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<Tree> for Object {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Self::Commit(commit)
    }
}

impl From<Label> for Object {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}
