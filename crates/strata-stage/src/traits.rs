use std::sync::Arc;

use strata_objects::Blob;

use crate::error::StageResult;
use crate::ignore::{is_ignored, IgnoreRule};

/// Path-keyed staging-area storage.
///
/// Paths are relative, `/`-separated and never start or end with a
/// separator; the empty path names the root. Directories are implied by the
/// stored file paths, so an empty directory does not exist.
pub trait FileStore: Send + Sync {
    /// Returns `true` if `path` names a stored file.
    fn is_file(&self, path: &str) -> StageResult<bool>;

    /// Returns `true` if `path` names an (implied) directory.
    fn is_directory(&self, path: &str) -> StageResult<bool>;

    /// Returns `true` if `path` names either a file or a directory.
    fn exists(&self, path: &str) -> StageResult<bool> {
        Ok(self.is_file(path)? || self.is_directory(path)?)
    }

    /// Read a file's content, failing when absent.
    fn fetch(&self, path: &str) -> StageResult<Vec<u8>>;

    /// Write a file's content, creating or overwriting it.
    fn store(&self, path: &str, content: Vec<u8>) -> StageResult<()>;

    /// Delete a single file.
    fn delete_file(&self, path: &str) -> StageResult<()>;

    /// Delete a directory, which must be empty.
    fn delete_dir(&self, path: &str) -> StageResult<()>;

    /// Delete a file, or a directory with everything under it.
    fn delete(&self, path: &str) -> StageResult<()>;

    /// Names of the files directly inside `path` (one level, any order).
    fn files(&self, path: &str) -> StageResult<Vec<String>>;

    /// Names of the directories directly inside `path` (one level, any
    /// order).
    fn directories(&self, path: &str) -> StageResult<Vec<String>>;

    /// Returns `true` if the staged content at `path` differs from the
    /// given blob.
    ///
    /// The default implementation re-hashes the staged content with the
    /// blob hasher, so it is algorithm-compatible with object identity by
    /// construction.
    fn changed(&self, path: &str, blob: &Blob) -> StageResult<bool> {
        Ok(Blob::new(self.fetch(path)?).id() != blob.id())
    }

    /// Every file path in the store, minus the ignored ones, sorted.
    ///
    /// Walks with an explicit work stack so arbitrarily deep path trees do
    /// not recurse natively.
    fn all_files(&self, ignore: &[IgnoreRule]) -> StageResult<Vec<String>> {
        let mut result = Vec::new();
        let mut pending = vec![String::new()];

        while let Some(dir) = pending.pop() {
            for name in self.files(&dir)? {
                let path = join_path(&dir, &name);
                if !is_ignored(&path, ignore) {
                    result.push(path);
                }
            }
            for name in self.directories(&dir)? {
                let path = join_path(&dir, &name);
                if !is_ignored(&path, ignore) {
                    pending.push(path);
                }
            }
        }

        result.sort();
        Ok(result)
    }
}

/// Join a directory path and an entry name with a single separator.
///
/// The empty directory is the root, so `join_path("", "a.txt")` is just
/// `"a.txt"`.
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name.trim_start_matches('/'))
    }
}

impl<F: FileStore + ?Sized> FileStore for &F {
    fn is_file(&self, path: &str) -> StageResult<bool> {
        (**self).is_file(path)
    }

    fn is_directory(&self, path: &str) -> StageResult<bool> {
        (**self).is_directory(path)
    }

    fn exists(&self, path: &str) -> StageResult<bool> {
        (**self).exists(path)
    }

    fn changed(&self, path: &str, blob: &Blob) -> StageResult<bool> {
        (**self).changed(path, blob)
    }

    fn all_files(&self, ignore: &[IgnoreRule]) -> StageResult<Vec<String>> {
        (**self).all_files(ignore)
    }

    fn fetch(&self, path: &str) -> StageResult<Vec<u8>> {
        (**self).fetch(path)
    }

    fn store(&self, path: &str, content: Vec<u8>) -> StageResult<()> {
        (**self).store(path, content)
    }

    fn delete_file(&self, path: &str) -> StageResult<()> {
        (**self).delete_file(path)
    }

    fn delete_dir(&self, path: &str) -> StageResult<()> {
        (**self).delete_dir(path)
    }

    fn delete(&self, path: &str) -> StageResult<()> {
        (**self).delete(path)
    }

    fn files(&self, path: &str) -> StageResult<Vec<String>> {
        (**self).files(path)
    }

    fn directories(&self, path: &str) -> StageResult<Vec<String>> {
        (**self).directories(path)
    }
}

impl<F: FileStore + ?Sized> FileStore for Arc<F> {
    fn is_file(&self, path: &str) -> StageResult<bool> {
        (**self).is_file(path)
    }

    fn is_directory(&self, path: &str) -> StageResult<bool> {
        (**self).is_directory(path)
    }

    fn exists(&self, path: &str) -> StageResult<bool> {
        (**self).exists(path)
    }

    fn changed(&self, path: &str, blob: &Blob) -> StageResult<bool> {
        (**self).changed(path, blob)
    }

    fn all_files(&self, ignore: &[IgnoreRule]) -> StageResult<Vec<String>> {
        (**self).all_files(ignore)
    }

    fn fetch(&self, path: &str) -> StageResult<Vec<u8>> {
        (**self).fetch(path)
    }

    fn store(&self, path: &str, content: Vec<u8>) -> StageResult<()> {
        (**self).store(path, content)
    }

    fn delete_file(&self, path: &str) -> StageResult<()> {
        (**self).delete_file(path)
    }

    fn delete_dir(&self, path: &str) -> StageResult<()> {
        (**self).delete_dir(path)
    }

    fn delete(&self, path: &str) -> StageResult<()> {
        (**self).delete(path)
    }

    fn files(&self, path: &str) -> StageResult<Vec<String>> {
        (**self).files(path)
    }

    fn directories(&self, path: &str) -> StageResult<Vec<String>> {
        (**self).directories(path)
    }
}
