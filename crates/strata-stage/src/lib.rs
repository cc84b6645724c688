//! Staging-area abstraction for strata.
//!
//! The repository snapshots and restores files through the [`FileStore`]
//! trait: a flat, path-keyed content store with one level of enumeration per
//! call. Directories are implied by the paths, never stored themselves.
//!
//! [`MemoryFileStore`] is the in-memory reference implementation used by
//! tests and embedders; a real working-tree backend implements the same
//! trait against the filesystem.
//!
//! Ignore filtering is shared here as [`IgnoreRule`]: a rule is an exact
//! string or a glob pattern, and a path is ignored when any rule matches
//! either its full relative form or its final segment.

pub mod error;
pub mod ignore;
pub mod memory;
pub mod traits;

pub use error::{StageError, StageResult};
pub use ignore::{is_ignored, IgnoreRule};
pub use memory::MemoryFileStore;
pub use traits::{join_path, FileStore};
