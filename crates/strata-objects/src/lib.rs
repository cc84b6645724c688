//! The strata object model.
//!
//! Four object kinds make up a repository's history:
//!
//! - [`Blob`] -- raw content (a file's data). Nameless; identity is purely
//!   content.
//! - [`Tree`] -- a directory snapshot mapping names to blob and subtree ids.
//! - [`Commit`] -- message, author, date, a tree id and zero or more parent
//!   commit ids, forming a DAG.
//! - [`Label`] -- a mutable named pointer to another object (e.g. a branch
//!   head). The only mutable entity in the model.
//!
//! # Identity
//!
//! Blob, Tree and Commit are content-hashed: their id is the domain-separated
//! BLAKE3 hash of their canonical form, computed at construction. Each has
//! three constructors:
//!
//! - `new(fields)` -- computes the id from the fields.
//! - `verified(fields, id)` -- recomputes the hash and fails with
//!   [`ObjectError::InvalidObject`] if the supplied id does not match.
//! - `trusted(fields, id)` -- accepts the id without re-hashing. Only for
//!   loading objects that were already verified, e.g. during history
//!   traversal where re-hashing every ancestor would be wasted work.
//!
//! Equality and hashing of the hashed kinds is by id alone. A [`Label`]
//! compares by name and reference together.
//!
//! # Lifecycle
//!
//! Hashed objects are created once and never change; there is no delete or
//! update operation, and orphaned objects are harmless because ids are
//! content-derived. A label is created once per name and mutated in place
//! every time its pointer advances.

pub mod blob;
pub mod commit;
pub mod error;
pub mod kind;
pub mod label;
pub mod object;
pub mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use error::{ObjectError, ObjectResult};
pub use kind::ObjectKind;
pub use label::Label;
pub use object::{Object, Verification};
pub use tree::Tree;
