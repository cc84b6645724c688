use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use strata_types::{ContentHasher, ObjectId};

use crate::error::{ObjectError, ObjectResult};
use crate::kind::ObjectKind;

/// Raw content object.
///
/// A blob is nameless: the file name lives in the [`Tree`] entry that
/// references it, so the same content stored under ten paths is one blob.
///
/// [`Tree`]: crate::tree::Tree
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct Blob {
    id: ObjectId,
    content: Vec<u8>,
}

impl Blob {
    /// Attribute names of the record form, in order.
    pub const FIELDS: &'static [&'static str] = &["id", "content"];

    /// Create a blob from raw content, computing its id.
    pub fn new(content: Vec<u8>) -> Self {
        let id = ContentHasher::BLOB.hash(&content);
        Self { id, content }
    }

    /// Create a blob with an explicit id, verifying it against the content.
    pub fn verified(content: Vec<u8>, id: ObjectId) -> ObjectResult<Self> {
        let computed = ContentHasher::BLOB.hash(&content);
        if computed != id {
            return Err(ObjectError::InvalidObject {
                kind: ObjectKind::Blob,
                supplied: id,
                computed,
            });
        }
        Ok(Self { id, content })
    }

    /// Create a blob with an explicit id, skipping hash verification.
    ///
    /// Only for objects whose id was already verified (e.g. loaded back from
    /// a store during traversal).
    pub fn trusted(content: Vec<u8>, id: ObjectId) -> Self {
        Self { id, content }
    }

    /// The blob's content-derived id.
    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// The raw content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the blob, yielding its content.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Recompute the content hash and check it against the stored id.
    pub fn verify(&self) -> ObjectResult<()> {
        let computed = ContentHasher::BLOB.hash(&self.content);
        if computed != self.id {
            return Err(ObjectError::InvalidObject {
                kind: ObjectKind::Blob,
                supplied: self.id.clone(),
                computed,
            });
        }
        Ok(())
    }
}

// Identity of a hashed object is its id alone.
impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Blob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
