//! Tree walking helpers: recursive file listing and path resolution.

use strata_objects::Tree;
use strata_stage::{is_ignored, join_path, IgnoreRule};
use strata_store::ObjectStore;
use strata_types::ObjectId;

use crate::error::RepoResult;

/// Every `(path, blob_id)` pair reachable from `tree`, minus ignored ones,
/// sorted by path.
///
/// Walks with an explicit work stack, mirroring the staging area's
/// `all_files`, so the two sides of a status comparison enumerate the same
/// way.
pub fn tree_files<S: ObjectStore>(
    store: &S,
    tree: &Tree,
    ignore: &[IgnoreRule],
) -> RepoResult<Vec<(String, ObjectId)>> {
    let mut result = Vec::new();
    let mut pending: Vec<(String, Tree)> = vec![(String::new(), tree.clone())];

    while let Some((prefix, tree)) = pending.pop() {
        for (name, blob_id) in tree.files() {
            let path = join_path(&prefix, name);
            if !is_ignored(&path, ignore) {
                result.push((path, blob_id.clone()));
            }
        }
        for (name, tree_id) in tree.trees() {
            let path = join_path(&prefix, name);
            if !is_ignored(&path, ignore) {
                pending.push((path, store.fetch_tree(tree_id)?));
            }
        }
    }

    result.sort();
    Ok(result)
}

/// Resolve a `/`-separated path inside a tree to a blob or subtree id.
///
/// The empty path and `"."` resolve to the tree itself. At the final
/// segment a file entry wins over a directory of the same name. Returns
/// `None` when any segment is missing.
pub fn resolve_path<S: ObjectStore>(
    store: &S,
    tree: &Tree,
    path: &str,
) -> RepoResult<Option<ObjectId>> {
    let path = path.trim_matches('/');
    if path.is_empty() || path == "." {
        return Ok(Some(tree.id().clone()));
    }

    let mut current = tree.clone();
    let mut segments = path.split('/').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            if let Some(id) = current.file(segment) {
                return Ok(Some(id.clone()));
            }
            if let Some(id) = current.subtree(segment) {
                return Ok(Some(id.clone()));
            }
            return Ok(None);
        }
        match current.subtree(segment) {
            Some(id) => current = store.fetch_tree(id)?,
            None => return Ok(None),
        }
    }
    Ok(None)
}
