//! Synchronization engine for strata.
//!
//! [`SyncEngine`] transfers the reachable history of a source store that is
//! not yet present at a destination store -- commits, trees and blobs --
//! then advances the destination's label. Fast-forward only: when the
//! destination's head is unknown to the source, the histories have
//! diverged and the engine refuses before touching anything.
//!
//! The two stores are same-process handles; a networked sync would front
//! each store with RPC and is out of scope here.

pub mod engine;
pub mod error;

pub use engine::{SyncEngine, SyncReport};
pub use error::{SyncError, SyncResult};
