//! Print files read from a local directory tree.
//!
//! # Directory layout expected
//!
//! ```text
//! print-files/
//! ├── 11K001/
//! │   ├── 11K001-UTS_master.pdf
//! │   └── front/
//! │       └── 11K001-UTS-01-01_print.png   ← tagged "front"
//! └── 22B002/
//!     └── 22B002-MUG-02.png
//! ```
//!
//! Only names are inspected; contents are never opened.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use printmatch_core::{
    application::{ApplicationError, ports::PrintFileStore},
    domain::{ArtworkCode, PrintFile, PrintFileId},
    error::{PrintMatchError, PrintMatchResult},
};

const STORE_NAME: &str = "print file store";

/// Production print-file store over `<root>/<artwork_code>/**`.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PrintFileStore for LocalFileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list_print_files(&self, artwork: &ArtworkCode) -> PrintMatchResult<Vec<PrintFile>> {
        if !self.root.is_dir() {
            return Err(unavailable(&self.root, "directory not found"));
        }

        let dir = self.root.join(artwork.as_str());
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "No print files uploaded for artwork");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| unavailable(&dir, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&dir)
                .map_err(|e| unavailable(entry.path(), e))?;
            let rel_str = normalize_path(&rel.to_string_lossy());
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let tags: Vec<String> = rel
                .parent()
                .into_iter()
                .flat_map(Path::components)
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let mime = mime_guess::from_path(entry.path()).first_or_octet_stream();

            files.push(
                PrintFile::new(
                    PrintFileId::from_name(&format!("{artwork}/{rel_str}")),
                    file_name,
                    mime.essence_str(),
                )
                .with_tags(tags),
            );
        }

        debug!(count = files.len(), "Print files listed");
        Ok(files)
    }
}

/// Forward slashes everywhere so ids match across platforms.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn unavailable(path: &Path, e: impl std::fmt::Display) -> PrintMatchError {
    ApplicationError::StoreUnavailable {
        store: STORE_NAME,
        reason: format!("{}: {e}", path.display()),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn lists_nested_files_with_tags_and_mime() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "11K001/11K001-UTS_master.pdf");
        touch(root.path(), "11K001/front/11K001-UTS-01-01_print.png");
        touch(root.path(), "22B002/22B002-MUG.png");

        let store = LocalFileStore::new(root.path());
        let files = store.list_print_files(&"11K001".parse().unwrap()).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name, "11K001-UTS_master.pdf");
        assert_eq!(files[0].mime_type, "application/pdf");
        assert!(files[0].tags.is_empty());
        assert_eq!(files[1].file_name, "11K001-UTS-01-01_print.png");
        assert_eq!(files[1].mime_type, "image/png");
        assert_eq!(files[1].tags, vec!["front"]);
    }

    #[test]
    fn ids_are_stable_across_listings() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "11K001/11K001-UTS.png");
        let store = LocalFileStore::new(root.path());
        let artwork = "11K001".parse().unwrap();

        let first = store.list_print_files(&artwork).unwrap();
        let second = store.list_print_files(&artwork).unwrap();
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].id, PrintFileId::from_name("11K001/11K001-UTS.png"));
    }

    #[test]
    fn artwork_without_folder_has_no_files() {
        let root = TempDir::new().unwrap();
        let store = LocalFileStore::new(root.path());
        assert!(store
            .list_print_files(&"11K001".parse().unwrap())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn missing_root_is_unavailable() {
        let store = LocalFileStore::new("/definitely/not/here");
        let err = store
            .list_print_files(&"11K001".parse().unwrap())
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
