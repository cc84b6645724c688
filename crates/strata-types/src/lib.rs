//! Foundation types for strata.
//!
//! This crate defines the two primitives every other strata crate builds on:
//!
//! - [`ObjectId`] -- the opaque identifier of a stored object. For
//!   content-hashed objects (blobs, trees, commits) it is the hex form of a
//!   domain-separated BLAKE3 hash; for labels it is the label's name.
//! - [`ContentHasher`] -- the hashing contract shared by all content-hashed
//!   object kinds. Identical content always yields an identical id, which is
//!   what makes objects deduplicatable and safely upsertable.

pub mod error;
pub mod hash;
pub mod id;

pub use error::TypeError;
pub use hash::{push_field, ContentHasher};
pub use id::ObjectId;
