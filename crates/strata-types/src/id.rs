use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a stored object.
///
/// For content-hashed objects (blobs, trees, commits) the id is the lowercase
/// hex encoding of the object's content hash, so identical content always
/// produces the same `ObjectId`. Labels are not content-hashed; their id is
/// the label's name. Both flavors live in the same store namespace, which is
/// why the id is an opaque string rather than a fixed-width hash.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap a caller-assigned id (e.g. a label name).
    ///
    /// Fails with [`TypeError::EmptyId`] on an empty string -- an empty id
    /// can never be fetched back.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Wrap a pre-computed content hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hex::encode(hash))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log output (first 8 characters, or the whole
    /// id when shorter).
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map_or(self.0.len(), |(idx, _)| idx);
        &self.0[..end]
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<[u8; 32]> for ObjectId {
    fn from(hash: [u8; 32]) -> Self {
        Self::from_hash(hash)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty() {
        assert_eq!(ObjectId::new("").unwrap_err(), TypeError::EmptyId);
    }

    #[test]
    fn new_accepts_names() {
        let id = ObjectId::new("head").unwrap();
        assert_eq!(id.as_str(), "head");
    }

    #[test]
    fn from_hash_is_hex() {
        let id = ObjectId::from_hash([0xab; 32]);
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn short_is_8_chars() {
        let id = ObjectId::from_hash([7; 32]);
        assert_eq!(id.short().len(), 8);
    }

    #[test]
    fn short_of_short_name_is_whole_name() {
        let id = ObjectId::new("head").unwrap();
        assert_eq!(id.short(), "head");
    }

    #[test]
    fn display_is_full_id() {
        let id = ObjectId::from_hash([1; 32]);
        assert_eq!(format!("{id}"), id.as_str());
    }

    #[test]
    fn serde_roundtrip_is_transparent() {
        let id = ObjectId::new("main").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"main\"");
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = ObjectId::new("aaa").unwrap();
        let b = ObjectId::new("bbb").unwrap();
        assert!(a < b);
    }
}
