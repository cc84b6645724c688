use std::collections::{HashSet, VecDeque};

use strata_objects::{Commit, Label, Object, ObjectError, Tree};
use strata_store::ObjectStore;
use strata_types::ObjectId;
use tracing::debug;

use crate::error::{SyncError, SyncResult};

/// One-directional, fast-forward-only synchronization between two stores.
///
/// Everything reachable from the source label's commit that the
/// destination lacks is transferred; the destination label is advanced
/// strictly last, so a crash mid-transfer leaves the destination's
/// reachable graph exactly where it was. Orphaned objects from an aborted
/// run are harmless: ids are content-derived, and a later run upserts over
/// them.
pub struct SyncEngine<S, D> {
    source: S,
    destination: D,
    source_label: ObjectId,
    destination_label: ObjectId,
}

/// What a successful [`SyncEngine::sync`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncReport {
    /// Commits transferred.
    pub commits: usize,
    /// Trees transferred.
    pub trees: usize,
    /// Blobs transferred.
    pub blobs: usize,
    /// The destination label's new reference: the source's head commit.
    pub new_head: ObjectId,
}

impl SyncReport {
    /// Total number of objects transferred.
    pub fn total_objects(&self) -> usize {
        self.commits + self.trees + self.blobs
    }

    /// Returns `true` if the destination was already up to date.
    pub fn is_noop(&self) -> bool {
        self.total_objects() == 0
    }
}

impl<S: ObjectStore, D: ObjectStore> SyncEngine<S, D> {
    /// Create an engine over a source and destination store, naming the
    /// label to read on the source and the label to advance on the
    /// destination.
    pub fn new(
        source: S,
        source_label: &str,
        destination: D,
        destination_label: &str,
    ) -> SyncResult<Self> {
        let source_label = ObjectId::new(source_label).map_err(ObjectError::from)?;
        let destination_label = ObjectId::new(destination_label).map_err(ObjectError::from)?;
        Ok(Self {
            source,
            destination,
            source_label,
            destination_label,
        })
    }

    /// Transfer all missing history and fast-forward the destination label.
    ///
    /// Fails with [`SyncError::NothingToSync`] when the source label
    /// references no commit, and with [`SyncError::DivergedHistories`] --
    /// before any transfer -- when the destination's current head is
    /// unknown to the source.
    pub fn sync(&self) -> SyncResult<SyncReport> {
        let source_head = self
            .read_label(&self.source, &self.source_label)?
            .and_then(|label| label.reference_id().cloned())
            .ok_or(SyncError::NothingToSync)?;

        let destination_label = self.read_label(&self.destination, &self.destination_label)?;
        if let Some(dest_head) = destination_label
            .as_ref()
            .and_then(|label| label.reference_id())
        {
            if !self.source.contains(dest_head)? {
                return Err(SyncError::DivergedHistories);
            }
        }

        let missing = self.missing_commits(&source_head)?;

        let mut trees = 0;
        let mut blobs = 0;
        for commit in &missing {
            self.copy_tree(commit.tree(), &mut trees, &mut blobs)?;
            self.destination
                .insert(commit.id(), Object::Commit(commit.clone()))?;
            debug!(id = %commit.id().short(), "transferred commit");
        }

        // Advance the pointer only after every object it references is in
        // place.
        let mut label = match destination_label {
            Some(label) => label,
            None => Label::new(self.destination_label.as_str(), None)?,
        };
        label.set_reference(source_head.clone());
        self.destination
            .insert(&self.destination_label, Object::Label(label))?;
        debug!(label = %self.destination_label, head = %source_head.short(), "advanced destination label");

        Ok(SyncReport {
            commits: missing.len(),
            trees,
            blobs,
            new_head: source_head,
        })
    }

    fn read_label(&self, store: &impl ObjectStore, name: &ObjectId) -> SyncResult<Option<Label>> {
        match store.get(name)? {
            Some(object) => Ok(Some(object.into_label()?)),
            None => Ok(None),
        }
    }

    /// Source commits absent from the destination, in BFS discovery order.
    ///
    /// A commit already present at the destination is neither collected
    /// nor expanded: its whole sub-history is shared and gets pruned in
    /// one membership test.
    fn missing_commits(&self, head: &ObjectId) -> SyncResult<Vec<Commit>> {
        let mut missing = Vec::new();
        let mut queue = VecDeque::from([head.clone()]);
        let mut seen: HashSet<ObjectId> = HashSet::from([head.clone()]);

        while let Some(id) = queue.pop_front() {
            if self.destination.contains(&id)? {
                continue;
            }
            let commit = self.source.fetch_commit(&id)?;
            for parent in commit.parents() {
                if seen.insert(parent.clone()) {
                    queue.push_back(parent.clone());
                }
            }
            missing.push(commit);
        }
        Ok(missing)
    }

    /// Upsert a tree with everything below it: blobs and nested trees
    /// strictly before the tree that references them.
    fn copy_tree(&self, root: &ObjectId, trees: &mut usize, blobs: &mut usize) -> SyncResult<()> {
        // Pre-order collection with an explicit stack; the reversal then
        // yields every subtree before its parent.
        let mut ordered: Vec<Tree> = Vec::new();
        let mut pending = vec![self.source.fetch_tree(root)?];
        while let Some(tree) = pending.pop() {
            for subtree_id in tree.trees().values() {
                pending.push(self.source.fetch_tree(subtree_id)?);
            }
            ordered.push(tree);
        }

        for tree in ordered.into_iter().rev() {
            for blob_id in tree.files().values() {
                if !self.destination.contains(blob_id)? {
                    *blobs += 1;
                }
                let blob = self.source.fetch_blob(blob_id)?;
                self.destination.insert(blob_id, Object::Blob(blob))?;
            }
            let tree_id = tree.id().clone();
            if !self.destination.contains(&tree_id)? {
                *trees += 1;
            }
            self.destination.insert(&tree_id, Object::Tree(tree))?;
        }
        Ok(())
    }
}
