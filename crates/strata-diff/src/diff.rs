use std::fmt::Display;
use std::hash::Hash;

use similar::{capture_diff_slices, Algorithm, DiffOp};

use crate::change::Change;
use crate::error::{DiffError, DiffResult};

/// An ordered edit script between two sequences.
///
/// Produced by [`diff_slices`]/[`diff_lines`], or by the merge engine, in
/// which case it may contain [`Change::Conflict`] entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diff<T> {
    changes: Vec<Change<T>>,
}

impl<T> Diff<T> {
    /// Wrap an already-computed change list.
    pub fn new(changes: Vec<Change<T>>) -> Self {
        Self { changes }
    }

    /// The changes in script order.
    pub fn changes(&self) -> &[Change<T>] {
        &self.changes
    }

    /// Iterate over the changes.
    pub fn iter(&self) -> std::slice::Iter<'_, Change<T>> {
        self.changes.iter()
    }

    /// Number of operations in the script.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns `true` if the script has no operations at all.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns `true` if any operation is not `Unchanged`.
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|change| !change.is_unchanged())
    }

    /// Returns `true` if any operation is a merge conflict.
    pub fn has_conflicts(&self) -> bool {
        self.changes.iter().any(Change::is_conflict)
    }

    /// Number of elements the script adds (inserts and replacements).
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.is_insert() || c.is_replace())
            .count()
    }

    /// Number of elements the script removes (deletes and replacements).
    pub fn deletions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.is_delete() || c.is_replace())
            .count()
    }
}

impl<T: Clone> Diff<T> {
    /// Replay the script, reconstructing the new sequence exactly.
    ///
    /// Every non-delete operation emits its new element. Fails with
    /// [`DiffError::UnresolvedConflict`] if the script still contains
    /// conflicts.
    pub fn new_content(&self) -> DiffResult<Vec<T>> {
        let mut content = Vec::new();
        for change in &self.changes {
            if change.is_conflict() {
                return Err(DiffError::UnresolvedConflict);
            }
            if let Some(element) = change.new_element() {
                content.push(element.clone());
            }
        }
        Ok(content)
    }

    /// Replay the script, materializing conflicts with explicit markers.
    ///
    /// A conflict is spliced as `start`, our side's rendering, `switch`,
    /// their side's rendering, `end`. Inner diffs are rendered recursively
    /// with the same markers.
    pub fn new_content_with_markers(&self, start: &T, switch: &T, end: &T) -> Vec<T> {
        let mut content = Vec::new();
        for change in &self.changes {
            match change {
                Change::Conflict(conflict) => {
                    content.push(start.clone());
                    content.extend(conflict.ours.new_content_with_markers(start, switch, end));
                    content.push(switch.clone());
                    content.extend(conflict.theirs.new_content_with_markers(start, switch, end));
                    content.push(end.clone());
                }
                other => {
                    if let Some(element) = other.new_element() {
                        content.push(element.clone());
                    }
                }
            }
        }
        content
    }
}

impl<T: Display> Diff<T> {
    /// Render the flat textual form of the script.
    ///
    /// Unchanged emits the element once, a delete emits `-element`, an
    /// insert emits `+element`, a replace emits `-old` followed by `+new`.
    /// Fails with [`DiffError::UnresolvedConflict`] on a conflicted script.
    pub fn render(&self) -> DiffResult<Vec<String>> {
        let mut lines = Vec::new();
        for change in &self.changes {
            match change {
                Change::Unchanged { element, .. } => lines.push(element.to_string()),
                Change::Delete { element, .. } => lines.push(format!("-{element}")),
                Change::Insert { element, .. } => lines.push(format!("+{element}")),
                Change::Replace {
                    old_element,
                    new_element,
                    ..
                } => {
                    lines.push(format!("-{old_element}"));
                    lines.push(format!("+{new_element}"));
                }
                Change::Conflict(_) => return Err(DiffError::UnresolvedConflict),
            }
        }
        Ok(lines)
    }

    /// [`render`](Self::render), concatenated. Line-based input keeps its
    /// own terminators, so no separator is interposed.
    pub fn to_text(&self) -> DiffResult<String> {
        Ok(self.render()?.concat())
    }
}

impl<'a, T> IntoIterator for &'a Diff<T> {
    type Item = &'a Change<T>;
    type IntoIter = std::slice::Iter<'a, Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl<T> IntoIterator for Diff<T> {
    type Item = Change<T>;
    type IntoIter = std::vec::IntoIter<Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Compute the minimal edit script between two sequences.
///
/// Runs Myers over the two slices and expands the resulting operation
/// blocks into per-element changes. Within one contiguous edit block, old
/// and new elements are paired into `Replace` operations first; the excess
/// becomes trailing `Delete`s or `Insert`s, which is the classic sdiff
/// shape.
pub fn diff_slices<T>(old: &[T], new: &[T]) -> Diff<T>
where
    T: Clone + Eq + Hash + Ord,
{
    let ops = capture_diff_slices(Algorithm::Myers, old, new);
    let mut changes = Vec::new();
    let mut index = 0;

    while index < ops.len() {
        if let DiffOp::Equal {
            old_index,
            new_index,
            len,
        } = ops[index]
        {
            for offset in 0..len {
                changes.push(Change::Unchanged {
                    old_position: old_index + offset,
                    new_position: new_index + offset,
                    element: old[old_index + offset].clone(),
                });
            }
            index += 1;
            continue;
        }

        // Fuse the run of consecutive non-equal ops into one edit block.
        // Their old/new ranges are contiguous by construction.
        let block_start = index;
        while index < ops.len() && !matches!(ops[index], DiffOp::Equal { .. }) {
            index += 1;
        }
        let old_start = ops[block_start].old_range().start;
        let old_end = ops[index - 1].old_range().end;
        let new_start = ops[block_start].new_range().start;
        let new_end = ops[index - 1].new_range().end;

        let old_len = old_end - old_start;
        let new_len = new_end - new_start;
        let paired = old_len.min(new_len);

        for offset in 0..paired {
            changes.push(Change::Replace {
                old_position: old_start + offset,
                new_position: new_start + offset,
                old_element: old[old_start + offset].clone(),
                new_element: new[new_start + offset].clone(),
            });
        }
        for offset in paired..old_len {
            changes.push(Change::Delete {
                old_position: old_start + offset,
                element: old[old_start + offset].clone(),
            });
        }
        for offset in paired..new_len {
            changes.push(Change::Insert {
                anchor: old_end,
                new_position: new_start + offset,
                element: new[new_start + offset].clone(),
            });
        }
    }

    Diff::new(changes)
}

/// Split text into lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Line-based convenience wrapper over [`diff_slices`].
pub fn diff_lines(old: &str, new: &str) -> Diff<String> {
    diff_slices(&split_lines(old), &split_lines(new))
}
