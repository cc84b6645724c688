//! Content-addressed object storage for strata.
//!
//! Every piece of history -- blobs, trees, commits -- is stored as an
//! immutable object keyed by its content-derived id. Labels live in the same
//! namespace under their name as the single mutable exception.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Hashed objects are immutable once written; content-addressing
//!    guarantees an id always maps to the same content.
//! 2. Inserts are idempotent upserts -- writing an object that already
//!    exists under the same id is observationally a no-op.
//! 3. The store never interprets object contents beyond the kind tag.
//! 4. A fetch of a missing id signals [`StoreError::NotFound`]; it is the
//!    caller's precondition check, not a soft state.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
