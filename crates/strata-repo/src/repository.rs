use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use strata_diff::{diff_slices, split_lines, Diff};
use strata_objects::{Blob, Commit, Label, Object, ObjectError, ObjectKind, Tree};
use strata_stage::{is_ignored, join_path, FileStore, IgnoreRule};
use strata_store::ObjectStore;
use strata_types::ObjectId;
use tracing::debug;

use crate::error::{RepoResult, RepositoryError};
use crate::history::HistoryWalk;
use crate::status::StatusReport;
use crate::treewalk::{resolve_path, tree_files};

/// A repository: an object store, a staging area, and a head pointer.
///
/// The head is mirrored into the object store as a [`Label`] under a fixed
/// name (`"head"` unless overridden), re-stored on every advance. The label
/// is the one non-hash-validated key in the store; everything else the
/// repository writes is content-addressed.
pub struct Repository<S, F> {
    store: S,
    stage: F,
    head: Option<ObjectId>,
    head_label: ObjectId,
}

impl<S: ObjectStore, F: FileStore> Repository<S, F> {
    /// Store key of the default head label.
    pub const DEFAULT_HEAD_LABEL: &'static str = "head";

    /// Open a repository over a store and staging area, resuming the head
    /// from the stored label when one exists.
    pub fn open(store: S, stage: F) -> RepoResult<Self> {
        Self::open_with_label(store, stage, Self::DEFAULT_HEAD_LABEL)
    }

    /// [`open`](Self::open) with a custom head label name.
    pub fn open_with_label(store: S, stage: F, label: &str) -> RepoResult<Self> {
        let head_label = ObjectId::new(label).map_err(ObjectError::from)?;
        let head = match store.get(&head_label)? {
            Some(Object::Label(label)) => label.reference_id().cloned(),
            Some(other) => return Err(RepositoryError::UnknownLabel(other.kind())),
            None => None,
        };
        Ok(Self {
            store,
            stage,
            head,
            head_label,
        })
    }

    /// The current head commit id, if any commit has been made or adopted.
    pub fn head(&self) -> Option<&ObjectId> {
        self.head.as_ref()
    }

    /// The underlying object store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying staging area.
    pub fn stage(&self) -> &F {
        &self.stage
    }

    /// Point the head at a commit, or at whatever a label references.
    ///
    /// Any other object kind fails with [`RepositoryError::UnknownLabel`].
    pub fn set_head(&mut self, target: &Object) -> RepoResult<()> {
        self.head = match target {
            Object::Commit(commit) => Some(commit.id().clone()),
            Object::Label(label) => label.reference_id().cloned(),
            other => return Err(RepositoryError::UnknownLabel(other.kind())),
        };
        self.persist_head()
    }

    /// Point the head directly at an object id.
    pub fn set_head_id(&mut self, id: ObjectId) -> RepoResult<()> {
        self.head = Some(id);
        self.persist_head()
    }

    /// Fetch any object by id, `None` when absent.
    pub fn get_object(&self, id: &ObjectId) -> RepoResult<Option<Object>> {
        Ok(self.store.get(id)?)
    }

    /// Snapshot the staging area under `path` into a stored [`Tree`].
    ///
    /// Files matching an ignore rule are skipped, as are ignored
    /// directories and everything below them. Blobs and trees already in
    /// the store are not re-stored; content addressing makes the snapshot
    /// incremental for free. Recursion depth is bounded by directory depth.
    pub fn create_tree(&self, path: &str, ignore: &[IgnoreRule]) -> RepoResult<Tree> {
        let mut files = BTreeMap::new();
        for name in self.stage.files(path)? {
            let file_path = join_path(path, &name);
            if is_ignored(&file_path, ignore) {
                continue;
            }
            let blob = Blob::new(self.stage.fetch(&file_path)?);
            let blob_id = blob.id().clone();
            if !self.store.contains(&blob_id)? {
                self.store.insert(&blob_id, Object::Blob(blob))?;
            }
            files.insert(name, blob_id);
        }

        let mut trees = BTreeMap::new();
        for name in self.stage.directories(path)? {
            let dir_path = join_path(path, &name);
            if is_ignored(&dir_path, ignore) {
                continue;
            }
            let subtree = self.create_tree(&dir_path, ignore)?;
            trees.insert(name, subtree.id().clone());
        }

        let tree = Tree::new(files, trees);
        if !self.store.contains(tree.id())? {
            self.store.insert(tree.id(), Object::Tree(tree.clone()))?;
        }
        debug!(path, id = %tree.id().short(), "snapshot tree");
        Ok(tree)
    }

    /// Snapshot the staging area, create a commit, and advance the head.
    ///
    /// `parents` overrides the default parent resolution of
    /// `[current head]` (or no parents for the first commit); pass an
    /// explicit list to create merge commits or detached roots.
    pub fn commit(
        &mut self,
        message: &str,
        author: &str,
        date: DateTime<Utc>,
        ignore: &[IgnoreRule],
        parents: Option<Vec<ObjectId>>,
    ) -> RepoResult<Commit> {
        let tree = self.create_tree("", ignore)?;
        let parents = match parents {
            Some(parents) => parents,
            None => self.head.iter().cloned().collect(),
        };

        let commit = Commit::new(message, tree.id().clone(), parents, author, date);
        self.store
            .insert(commit.id(), Object::Commit(commit.clone()))?;
        debug!(id = %commit.id().short(), message, "created commit");

        self.set_head_id(commit.id().clone())?;
        Ok(commit)
    }

    /// All commits reachable from the head, in BFS discovery order.
    ///
    /// A commit reached through multiple merge paths is listed exactly
    /// once. Empty when there is no head.
    pub fn history(&self) -> RepoResult<Vec<Commit>> {
        self.history_walk().collect()
    }

    /// Lazy variant of [`history`](Self::history).
    pub fn history_walk(&self) -> HistoryWalk<'_, S> {
        HistoryWalk::new(&self.store, self.head.clone())
    }

    /// Find a commit reachable from both the head and `other`.
    ///
    /// Walks `other`'s ancestry lazily and returns the first commit that is
    /// also in the head's ancestry -- *a* common ancestor in BFS discovery
    /// order, not necessarily the lowest one when several merge bases
    /// exist. `None` when the histories are disjoint or there is no head.
    pub fn common_ancestor(&self, other: &ObjectId) -> RepoResult<Option<Commit>> {
        let mut own = BTreeSet::new();
        for commit in self.history_walk() {
            own.insert(commit?.id().clone());
        }
        if own.is_empty() {
            return Ok(None);
        }

        for commit in HistoryWalk::new(&self.store, Some(other.clone())) {
            let commit = commit?;
            if own.contains(commit.id()) {
                return Ok(Some(commit));
            }
        }
        Ok(None)
    }

    /// Compare the staging area against a commit.
    ///
    /// With no commit, every staged file is reported as created. Otherwise
    /// files only in the staging area are created, files only in the
    /// commit's tree are deleted, and files in both are changed iff the
    /// staged content differs from the committed blob.
    pub fn status(
        &self,
        commit_id: Option<&ObjectId>,
        ignore: &[IgnoreRule],
    ) -> RepoResult<StatusReport> {
        let staged = self.stage.all_files(ignore)?;
        let Some(commit_id) = commit_id else {
            return Ok(StatusReport::all_created(staged));
        };

        let committed = self.commit_files(commit_id, ignore)?;
        let staged_set: BTreeSet<&String> = staged.iter().collect();

        let mut report = StatusReport::default();
        for path in &staged {
            match committed.get(path) {
                None => report.created.push(path.clone()),
                Some(blob_id) => {
                    let blob = self.store.fetch_blob(blob_id)?;
                    if self.stage.changed(path, &blob)? {
                        report.changed.push(path.clone());
                    }
                }
            }
        }
        for path in committed.keys() {
            if !staged_set.contains(path) {
                report.deleted.push(path.clone());
            }
        }
        Ok(report)
    }

    /// Compare the trees of two commits.
    ///
    /// A file is changed iff its blob id differs between the two trees; no
    /// content is read. Either side may be absent, in which case all of
    /// the other side's files are created (or deleted).
    pub fn tree_status(
        &self,
        base_commit: Option<&ObjectId>,
        other_commit: Option<&ObjectId>,
        ignore: &[IgnoreRule],
    ) -> RepoResult<StatusReport> {
        let base = match base_commit {
            Some(id) => self.commit_files(id, ignore)?,
            None => BTreeMap::new(),
        };
        let other = match other_commit {
            Some(id) => self.commit_files(id, ignore)?,
            None => BTreeMap::new(),
        };

        let mut report = StatusReport::default();
        for (path, blob_id) in &other {
            match base.get(path) {
                None => report.created.push(path.clone()),
                Some(base_id) if base_id != blob_id => report.changed.push(path.clone()),
                Some(_) => {}
            }
        }
        for path in base.keys() {
            if !other.contains_key(path) {
                report.deleted.push(path.clone());
            }
        }
        Ok(report)
    }

    /// Line diff of a staged file against its committed version.
    ///
    /// A file absent on either side diffs against the empty sequence. Both
    /// sides are normalized to end with a line terminator so the final
    /// lines cannot fuse into one spurious change.
    pub fn file_difference(&self, path: &str, commit_id: &ObjectId) -> RepoResult<Diff<String>> {
        let staged_lines = if self.stage.is_file(path)? {
            normalized_lines(&String::from_utf8_lossy(&self.stage.fetch(path)?))
        } else {
            Vec::new()
        };

        let commit = self.store.fetch_commit(commit_id)?;
        let tree = self.store.fetch_tree(commit.tree())?;
        let committed_lines = match resolve_path(&self.store, &tree, path)? {
            Some(id) => match self.store.fetch(&id)? {
                Object::Blob(blob) => normalized_lines(&String::from_utf8_lossy(blob.content())),
                _ => Vec::new(),
            },
            None => Vec::new(),
        };

        Ok(diff_slices(&committed_lines, &staged_lines))
    }

    /// Write a committed file -- or a whole committed directory -- back
    /// into the staging area.
    ///
    /// The empty path and `"."` restore the commit's entire tree. Fails
    /// with [`RepositoryError::PathNotFound`] when the path does not
    /// resolve inside the commit's tree.
    pub fn restore(&self, path: &str, commit_id: &ObjectId) -> RepoResult<()> {
        let commit = self.store.fetch_commit(commit_id)?;
        let tree = self.store.fetch_tree(commit.tree())?;
        let target = resolve_path(&self.store, &tree, path)?
            .ok_or_else(|| RepositoryError::PathNotFound(path.to_string()))?;

        let base = path.trim_matches('/');
        match self.store.fetch(&target)? {
            Object::Blob(blob) => {
                debug!(path = base, "restore file");
                self.stage.store(base, blob.content().to_vec())?;
            }
            Object::Tree(subtree) => {
                debug!(path = base, "restore directory");
                for (file, blob_id) in tree_files(&self.store, &subtree, &[])? {
                    let blob = self.store.fetch_blob(&blob_id)?;
                    self.stage
                        .store(&join_path(base, &file), blob.content().to_vec())?;
                }
            }
            // A commit or label id can never appear inside a tree.
            other => {
                return Err(RepositoryError::Object(ObjectError::KindMismatch {
                    expected: ObjectKind::Blob,
                    actual: other.kind(),
                }))
            }
        }
        Ok(())
    }

    fn commit_files(
        &self,
        commit_id: &ObjectId,
        ignore: &[IgnoreRule],
    ) -> RepoResult<BTreeMap<String, ObjectId>> {
        let commit = self.store.fetch_commit(commit_id)?;
        let tree = self.store.fetch_tree(commit.tree())?;
        Ok(tree_files(&self.store, &tree, ignore)?.into_iter().collect())
    }

    fn persist_head(&self) -> RepoResult<()> {
        let label = Label::new(self.head_label.as_str(), self.head.clone())?;
        debug!(label = %self.head_label, head = ?self.head, "advance head label");
        self.store.insert(&self.head_label, Object::Label(label))?;
        Ok(())
    }
}

/// Split text into lines, appending a terminator to the last line when it
/// lacks one.
fn normalized_lines(text: &str) -> Vec<String> {
    let mut lines = split_lines(text);
    if let Some(last) = lines.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }
    lines
}
