//! Three-way merge engine for strata.
//!
//! [`three_way`] combines two diffs taken against a common base into one
//! merged edit script, inserting explicit [`Conflict`] markers where the
//! two sides diverge.
//!
//! The algorithm groups every change from both diffs by the base position
//! it touches (inserts by their anchor) and walks the positions in
//! ascending order. At each position, if one side left the base alone, the
//! other side's changes win; if both sides made the exact same edit, it is
//! emitted once; otherwise the two changesets become a single conflict
//! wrapping both fragments whole.
//!
//! Changeset equivalence deliberately ignores `new_position`: an unrelated
//! insertion earlier in one side shifts every later new position, and that
//! must not manufacture false conflicts. A change expressed as one
//! contiguous edit on one side and as two adjacent edits on the other only
//! de-duplicates when both decompose into the same per-position operations;
//! anything else is a conflict -- no intent inference.

use std::collections::BTreeMap;
use std::hash::Hash;

use strata_diff::{diff_slices, Change, Conflict, Diff};

/// Merge two divergent versions of a sequence using their common base.
///
/// Returns the merged edit script against `base`. The script contains a
/// [`Change::Conflict`] for every base position the two sides edited
/// differently; a conflict-free result replays with
/// [`Diff::new_content`], a conflicted one with
/// [`Diff::new_content_with_markers`].
pub fn three_way<T>(base: &[T], ours: &[T], theirs: &[T]) -> Diff<T>
where
    T: Clone + Eq + Hash + Ord,
{
    let our_diff = diff_slices(base, ours);
    let their_diff = diff_slices(base, theirs);

    let mut merged = Vec::new();
    for (_, (our_set, their_set)) in combine(our_diff, their_diff) {
        if all_unchanged(&our_set) {
            merged.extend(their_set);
        } else if all_unchanged(&their_set) {
            merged.extend(our_set);
        } else if equivalent(&our_set, &their_set) {
            merged.extend(our_set);
        } else {
            merged.push(Change::Conflict(Box::new(Conflict {
                ours: Diff::new(our_set),
                theirs: Diff::new(their_set),
            })));
        }
    }

    Diff::new(merged)
}

type Changesets<T> = (Vec<Change<T>>, Vec<Change<T>>);

/// Group both diffs' changes by the base position they touch, in ascending
/// order. Each position holds two changesets, either possibly empty (an
/// empty changeset means that side left the position alone).
fn combine<T>(ours: Diff<T>, theirs: Diff<T>) -> BTreeMap<usize, Changesets<T>> {
    let mut combined: BTreeMap<usize, Changesets<T>> = BTreeMap::new();

    for change in ours {
        if let Some(position) = change.base_position() {
            combined.entry(position).or_default().0.push(change);
        }
    }
    for change in theirs {
        if let Some(position) = change.base_position() {
            combined.entry(position).or_default().1.push(change);
        }
    }

    combined
}

/// An empty changeset counts as unchanged: that side has no edit here.
fn all_unchanged<T>(changes: &[Change<T>]) -> bool {
    changes.iter().all(Change::is_unchanged)
}

/// Whole-changeset equivalence: same length and pairwise-equivalent
/// changes (tag, old position and elements; `new_position` excluded).
fn equivalent<T: PartialEq>(ours: &[Change<T>], theirs: &[Change<T>]) -> bool {
    ours.len() == theirs.len()
        && ours
            .iter()
            .zip(theirs)
            .all(|(our, their)| our.equivalent(their))
}
