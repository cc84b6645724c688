use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use crate::error::{StageError, StageResult};
use crate::traits::FileStore;

/// In-memory staging area.
///
/// Holds a flat path -> content map behind a `RwLock`; directories are
/// implied by the paths. Intended for tests and embedding, mirroring the
/// in-memory object store.
pub struct MemoryFileStore {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryFileStore {
    /// Create a new empty staging area.
    pub fn new() -> Self {
        Self {
            files: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a staging area pre-populated from `(path, content)` pairs.
    pub fn from_files<P, C>(entries: impl IntoIterator<Item = (P, C)>) -> StageResult<Self>
    where
        P: Into<String>,
        C: Into<Vec<u8>>,
    {
        let store = Self::new();
        for (path, content) in entries {
            store.store(&path.into(), content.into())?;
        }
        Ok(store)
    }

    /// Number of files currently staged.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }

    /// Normalize separators and strip leading/trailing ones.
    fn sanitize(path: &str) -> String {
        let mut out = String::with_capacity(path.len());
        let mut last_was_sep = false;
        for ch in path.chars() {
            let ch = if ch == '\\' { '/' } else { ch };
            if ch == '/' {
                if !last_was_sep && !out.is_empty() {
                    out.push('/');
                }
                last_was_sep = true;
            } else {
                out.push(ch);
                last_was_sep = false;
            }
        }
        if out.ends_with('/') {
            out.pop();
        }
        out
    }

    /// The prefix all entries of directory `path` share.
    fn dir_prefix(path: &str) -> String {
        let dir = Self::sanitize(path);
        if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        }
    }
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for MemoryFileStore {
    fn is_file(&self, path: &str) -> StageResult<bool> {
        let files = self.files.read().expect("lock poisoned");
        Ok(files.contains_key(&Self::sanitize(path)))
    }

    fn is_directory(&self, path: &str) -> StageResult<bool> {
        if self.is_file(path)? {
            return Ok(false);
        }
        let files = self.files.read().expect("lock poisoned");
        let prefix = Self::dir_prefix(path);
        if prefix.is_empty() {
            return Ok(!files.is_empty());
        }
        Ok(files.keys().any(|key| key.starts_with(&prefix)))
    }

    fn fetch(&self, path: &str) -> StageResult<Vec<u8>> {
        let files = self.files.read().expect("lock poisoned");
        files
            .get(&Self::sanitize(path))
            .cloned()
            .ok_or_else(|| StageError::NotFound(path.to_string()))
    }

    fn store(&self, path: &str, content: Vec<u8>) -> StageResult<()> {
        if path.ends_with('/') || path.ends_with('\\') {
            return Err(StageError::InvalidPath(path.to_string()));
        }
        let path = Self::sanitize(path);
        if path.is_empty() {
            return Err(StageError::InvalidPath(String::new()));
        }
        let mut files = self.files.write().expect("lock poisoned");
        files.insert(path, content);
        Ok(())
    }

    fn delete_file(&self, path: &str) -> StageResult<()> {
        let mut files = self.files.write().expect("lock poisoned");
        files
            .remove(&Self::sanitize(path))
            .map(|_| ())
            .ok_or_else(|| StageError::NotFound(path.to_string()))
    }

    fn delete_dir(&self, path: &str) -> StageResult<()> {
        let files = self.files.read().expect("lock poisoned");
        let prefix = Self::dir_prefix(path);
        let occupied = if prefix.is_empty() {
            !files.is_empty()
        } else {
            files.keys().any(|key| key.starts_with(&prefix))
        };
        if occupied {
            return Err(StageError::DirectoryNotEmpty(path.to_string()));
        }
        // Directories are implied by file paths, so an empty one is already
        // gone.
        Ok(())
    }

    fn delete(&self, path: &str) -> StageResult<()> {
        let sanitized = Self::sanitize(path);
        let mut files = self.files.write().expect("lock poisoned");
        if files.remove(&sanitized).is_some() {
            return Ok(());
        }
        let prefix = Self::dir_prefix(path);
        let doomed: Vec<String> = files
            .keys()
            .filter(|key| prefix.is_empty() || key.starts_with(&prefix))
            .cloned()
            .collect();
        if doomed.is_empty() {
            return Err(StageError::NotFound(path.to_string()));
        }
        for key in doomed {
            files.remove(&key);
        }
        Ok(())
    }

    fn files(&self, path: &str) -> StageResult<Vec<String>> {
        let files = self.files.read().expect("lock poisoned");
        let prefix = Self::dir_prefix(path);
        let names = files
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(str::to_string)
            .collect();
        Ok(names)
    }

    fn directories(&self, path: &str) -> StageResult<Vec<String>> {
        let files = self.files.read().expect("lock poisoned");
        let prefix = Self::dir_prefix(path);
        let names: BTreeSet<String> = files
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter_map(|rest| {
                let (first, remainder) = rest.split_once('/')?;
                if first.is_empty() || remainder.is_empty() {
                    return None;
                }
                Some(first.to_string())
            })
            .collect();
        Ok(names.into_iter().collect())
    }
}

impl std::fmt::Debug for MemoryFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFileStore")
            .field("file_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore::IgnoreRule;
    use strata_objects::Blob;

    fn sample_store() -> MemoryFileStore {
        MemoryFileStore::from_files([
            ("README.md", "readme"),
            ("src/lib.rs", "lib"),
            ("src/nested/deep.rs", "deep"),
            ("docs/guide.md", "guide"),
        ])
        .unwrap()
    }

    #[test]
    fn store_and_fetch() {
        let store = MemoryFileStore::new();
        store.store("a.txt", b"content".to_vec()).unwrap();
        assert_eq!(store.fetch("a.txt").unwrap(), b"content");
    }

    #[test]
    fn fetch_missing_is_not_found() {
        let store = MemoryFileStore::new();
        assert!(matches!(
            store.fetch("ghost.txt").unwrap_err(),
            StageError::NotFound(_)
        ));
    }

    #[test]
    fn store_rejects_directory_paths() {
        let store = MemoryFileStore::new();
        assert!(matches!(
            store.store("dir/", b"x".to_vec()).unwrap_err(),
            StageError::InvalidPath(_)
        ));
    }

    #[test]
    fn paths_are_sanitized() {
        let store = MemoryFileStore::new();
        store.store("/src//lib.rs", b"x".to_vec()).unwrap();
        assert!(store.is_file("src/lib.rs").unwrap());
        assert!(store.is_file("src\\lib.rs").unwrap());
    }

    #[test]
    fn file_and_directory_predicates() {
        let store = sample_store();
        assert!(store.is_file("src/lib.rs").unwrap());
        assert!(!store.is_file("src").unwrap());
        assert!(store.is_directory("src").unwrap());
        assert!(store.is_directory("src/nested").unwrap());
        assert!(!store.is_directory("src/lib.rs").unwrap());
        assert!(store.exists("src").unwrap());
        assert!(store.exists("README.md").unwrap());
        assert!(!store.exists("missing").unwrap());
    }

    #[test]
    fn files_enumerates_one_level() {
        let store = sample_store();
        assert_eq!(store.files("").unwrap(), vec!["README.md"]);
        assert_eq!(store.files("src").unwrap(), vec!["lib.rs"]);
        assert_eq!(store.files("src/nested").unwrap(), vec!["deep.rs"]);
    }

    #[test]
    fn directories_enumerates_one_level() {
        let store = sample_store();
        assert_eq!(store.directories("").unwrap(), vec!["docs", "src"]);
        assert_eq!(store.directories("src").unwrap(), vec!["nested"]);
        assert!(store.directories("docs").unwrap().is_empty());
    }

    #[test]
    fn delete_file_removes_only_that_file() {
        let store = sample_store();
        store.delete_file("src/lib.rs").unwrap();
        assert!(!store.is_file("src/lib.rs").unwrap());
        assert!(store.is_file("src/nested/deep.rs").unwrap());

        assert!(matches!(
            store.delete_file("src/lib.rs").unwrap_err(),
            StageError::NotFound(_)
        ));
    }

    #[test]
    fn delete_dir_requires_empty() {
        let store = sample_store();
        assert!(matches!(
            store.delete_dir("src").unwrap_err(),
            StageError::DirectoryNotEmpty(_)
        ));
        // An implied directory with no files left is already gone.
        store.delete("src").unwrap();
        store.delete_dir("src").unwrap();
    }

    #[test]
    fn delete_recursive_removes_subtree() {
        let store = sample_store();
        store.delete("src").unwrap();
        assert!(!store.exists("src").unwrap());
        assert!(store.is_file("README.md").unwrap());

        assert!(matches!(
            store.delete("src").unwrap_err(),
            StageError::NotFound(_)
        ));
    }

    #[test]
    fn all_files_walks_recursively_sorted() {
        let store = sample_store();
        assert_eq!(
            store.all_files(&[]).unwrap(),
            vec!["README.md", "docs/guide.md", "src/lib.rs", "src/nested/deep.rs"]
        );
    }

    #[test]
    fn all_files_honors_ignore_rules() {
        let store = sample_store();
        let rules = vec![IgnoreRule::exact("src"), IgnoreRule::pattern("*.md")];
        assert!(store.all_files(&rules).unwrap().is_empty());

        let rules = vec![IgnoreRule::exact("deep.rs")];
        assert_eq!(
            store.all_files(&rules).unwrap(),
            vec!["README.md", "docs/guide.md", "src/lib.rs"]
        );
    }

    #[test]
    fn changed_compares_against_blob_content() {
        let store = sample_store();
        let same = Blob::new(b"lib".to_vec());
        let other = Blob::new(b"different".to_vec());
        assert!(!store.changed("src/lib.rs", &same).unwrap());
        assert!(store.changed("src/lib.rs", &other).unwrap());
    }

    #[test]
    fn from_files_counts() {
        let store = sample_store();
        assert_eq!(store.len(), 4);
        assert!(!store.is_empty());
        assert!(MemoryFileStore::new().is_empty());
    }
}
