use crate::diff::Diff;

/// One operation of an edit script.
///
/// Positions are indices into the two input sequences. An `Insert` has no
/// position in the old sequence; it carries the base `anchor` it attaches
/// to (the index of the old element it precedes, one past the end for an
/// append), which is what the merge engine groups by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change<T> {
    /// The element is present in both sequences.
    Unchanged {
        old_position: usize,
        new_position: usize,
        element: T,
    },
    /// The element exists only in the new sequence.
    Insert {
        anchor: usize,
        new_position: usize,
        element: T,
    },
    /// The element exists only in the old sequence.
    Delete { old_position: usize, element: T },
    /// An old element was replaced by a new one at the same alignment slot.
    Replace {
        old_position: usize,
        new_position: usize,
        old_element: T,
        new_element: T,
    },
    /// Two divergent edits of the same base region (see [`Conflict`]).
    Conflict(Box<Conflict<T>>),
}

/// A composite change produced by a three-way merge: the two divergent edit
/// fragments at one base position, kept as whole sub-diffs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict<T> {
    pub ours: Diff<T>,
    pub theirs: Diff<T>,
}

impl<T> Change<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }

    pub fn is_replace(&self) -> bool {
        matches!(self, Self::Replace { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Index in the old sequence, absent for inserts and conflicts.
    pub fn old_position(&self) -> Option<usize> {
        match self {
            Self::Unchanged { old_position, .. }
            | Self::Delete { old_position, .. }
            | Self::Replace { old_position, .. } => Some(*old_position),
            Self::Insert { .. } | Self::Conflict(_) => None,
        }
    }

    /// Index in the new sequence, absent for deletes and conflicts.
    pub fn new_position(&self) -> Option<usize> {
        match self {
            Self::Unchanged { new_position, .. }
            | Self::Insert { new_position, .. }
            | Self::Replace { new_position, .. } => Some(*new_position),
            Self::Delete { .. } | Self::Conflict(_) => None,
        }
    }

    /// The old-sequence element, when the operation touches one.
    pub fn old_element(&self) -> Option<&T> {
        match self {
            Self::Unchanged { element, .. } | Self::Delete { element, .. } => Some(element),
            Self::Replace { old_element, .. } => Some(old_element),
            Self::Insert { .. } | Self::Conflict(_) => None,
        }
    }

    /// The new-sequence element, when the operation produces one.
    pub fn new_element(&self) -> Option<&T> {
        match self {
            Self::Unchanged { element, .. } | Self::Insert { element, .. } => Some(element),
            Self::Replace { new_element, .. } => Some(new_element),
            Self::Delete { .. } | Self::Conflict(_) => None,
        }
    }

    /// The base-sequence position this change is grouped under during a
    /// merge: the old position for aligned operations, the anchor for
    /// inserts. Conflicts have no single base position.
    pub fn base_position(&self) -> Option<usize> {
        match self {
            Self::Unchanged { old_position, .. }
            | Self::Delete { old_position, .. }
            | Self::Replace { old_position, .. } => Some(*old_position),
            Self::Insert { anchor, .. } => Some(*anchor),
            Self::Conflict(_) => None,
        }
    }
}

impl<T: PartialEq> Change<T> {
    /// Whether two changes describe the same edit.
    ///
    /// Compares the tag, the old position and both elements. The new
    /// position is deliberately excluded: unrelated insertions elsewhere in
    /// one sequence shift it, and that must not turn identical edits into a
    /// conflict.
    pub fn equivalent(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && !self.is_conflict()
            && self.old_position() == other.old_position()
            && self.old_element() == other.old_element()
            && self.new_element() == other.new_element()
    }
}
