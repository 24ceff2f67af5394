//! In-memory print-file store.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use printmatch_core::{
    application::{ApplicationError, ports::PrintFileStore},
    domain::{ArtworkCode, PrintFile},
    error::PrintMatchResult,
};

/// Thread-safe in-memory print-file store, grouped by artwork.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStore {
    inner: Arc<RwLock<BTreeMap<ArtworkCode, Vec<PrintFile>>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an uploaded file for `artwork`.
    pub fn insert(&self, artwork: ArtworkCode, file: PrintFile) -> PrintMatchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.entry(artwork).or_default().push(file);
        Ok(())
    }
}

impl PrintFileStore for InMemoryFileStore {
    fn list_print_files(&self, artwork: &ArtworkCode) -> PrintMatchResult<Vec<PrintFile>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(artwork).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printmatch_core::domain::PrintFileId;

    #[test]
    fn files_are_scoped_to_their_artwork() {
        let store = InMemoryFileStore::new();
        let a: ArtworkCode = "11K001".parse().unwrap();
        let b: ArtworkCode = "22B002".parse().unwrap();
        store
            .insert(
                a.clone(),
                PrintFile::new(PrintFileId::new(), "11K001-UTS.png", "image/png"),
            )
            .unwrap();

        assert_eq!(store.list_print_files(&a).unwrap().len(), 1);
        assert!(store.list_print_files(&b).unwrap().is_empty());
    }
}
