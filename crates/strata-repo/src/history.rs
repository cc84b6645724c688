use std::collections::{HashSet, VecDeque};

use strata_objects::Commit;
use strata_store::ObjectStore;
use strata_types::ObjectId;

use crate::error::RepoResult;

/// Lazy breadth-first walk over a commit's ancestry.
///
/// Yields each reachable commit exactly once, in BFS discovery order --
/// not topological or chronological order. A commit reached through
/// several merge paths or shared by several children is visited the first
/// time only.
pub struct HistoryWalk<'a, S: ObjectStore> {
    store: &'a S,
    queue: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'a, S: ObjectStore> HistoryWalk<'a, S> {
    /// Start a walk at `start` (no commits are yielded when `None`).
    pub fn new(store: &'a S, start: Option<ObjectId>) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        if let Some(id) = start {
            visited.insert(id.clone());
            queue.push_back(id);
        }
        Self {
            store,
            queue,
            visited,
        }
    }
}

impl<S: ObjectStore> Iterator for HistoryWalk<'_, S> {
    type Item = RepoResult<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let commit = match self.store.fetch_commit(&id) {
            Ok(commit) => commit,
            Err(err) => return Some(Err(err.into())),
        };
        for parent in commit.parents() {
            if self.visited.insert(parent.clone()) {
                self.queue.push_back(parent.clone());
            }
        }
        Some(Ok(commit))
    }
}
