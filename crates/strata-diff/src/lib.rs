//! Diff engine for strata.
//!
//! Computes a minimal edit script between two ordered sequences of
//! comparable elements (typically lines of text) via longest-common-
//! subsequence alignment, using the `similar` crate's Myers implementation.
//!
//! # Key Types
//!
//! - [`Change`] -- one edit operation: `Unchanged`, `Insert`, `Delete`,
//!   `Replace`, or a composite [`Conflict`] produced by a three-way merge.
//! - [`Diff`] -- an ordered edit script with rendering and replay.
//!
//! The change set is a single closed enum, so code that discriminates by
//! tag handles merge conflicts uniformly with ordinary edits -- there is no
//! open extension point and no downcasting.

pub mod change;
pub mod diff;
pub mod error;

pub use change::{Change, Conflict};
pub use diff::{diff_lines, diff_slices, split_lines, Diff};
pub use error::{DiffError, DiffResult};
