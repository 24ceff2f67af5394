//! Variant store that persists assignments to a JSON file.
//!
//! Variants themselves come from the catalog. Only the
//! `full_sku -> print file` pairs are written, keyed by SKU so the file
//! survives catalog reloads that mint new variant ids.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use printmatch_core::{
    application::{ApplicationError, ports::VariantStore},
    domain::{ArtworkCode, PrintFileId, VariantId, VariantRecord},
    error::{PrintMatchError, PrintMatchResult},
};

use super::InMemoryVariantStore;

const STORE_NAME: &str = "assignment file";

#[derive(Debug, Serialize, Deserialize)]
struct AssignmentEntry {
    print_file_id: PrintFileId,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// [`InMemoryVariantStore`] backed by an assignment file.
#[derive(Debug, Clone)]
pub struct JsonVariantStore {
    path: PathBuf,
    inner: InMemoryVariantStore,
}

impl JsonVariantStore {
    /// Wrap `variants`, applying any assignments already saved at `path`.
    ///
    /// A missing file is treated as empty. Entries for SKUs the catalog no
    /// longer lists are dropped on the next write.
    #[instrument(skip(variants), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, variants: InMemoryVariantStore) -> PrintMatchResult<Self> {
        let path = path.as_ref().to_path_buf();

        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| unavailable(&path, e))?;
            let saved: BTreeMap<String, AssignmentEntry> =
                serde_json::from_str(&raw).map_err(|e| unavailable(&path, e))?;

            let mut restored = 0usize;
            for (sku, entry) in saved {
                if variants.restore(&sku, entry.print_file_id, entry.updated_at)? {
                    restored += 1;
                } else {
                    warn!(%sku, "Saved assignment for unknown variant ignored");
                }
            }
            debug!(restored, "Assignments loaded");
        }

        Ok(Self {
            path,
            inner: variants,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> PrintMatchResult<()> {
        let saved: BTreeMap<String, AssignmentEntry> = self
            .inner
            .assignments()?
            .into_iter()
            .filter_map(|(record, updated_at)| {
                record.print_file_id.map(|print_file_id| {
                    (
                        record.full_sku,
                        AssignmentEntry {
                            print_file_id,
                            updated_at,
                        },
                    )
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&saved).map_err(|e| unavailable(&self.path, e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| unavailable(&self.path, e))?;
        }

        // Write beside the target and rename so a crash never truncates it.
        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, json).map_err(|e| unavailable(&staged, e))?;
        fs::rename(&staged, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staged);
            unavailable(&self.path, e)
        })
    }
}

impl VariantStore for JsonVariantStore {
    fn list_variants(&self, artwork: &ArtworkCode) -> PrintMatchResult<Vec<VariantRecord>> {
        self.inner.list_variants(artwork)
    }

    fn set_print_file(&self, variant: VariantId, print_file: PrintFileId) -> PrintMatchResult<()> {
        let previous = self
            .inner
            .get(variant)?
            .ok_or(ApplicationError::VariantNotFound { id: variant })?
            .print_file_id;
        let previous_at = self.inner.updated_at(variant)?;

        self.inner.set_print_file(variant, print_file)?;
        if let Err(e) = self.persist() {
            warn!(%variant, error = %e, "Assignment not saved, reverting");
            self.inner.revert(variant, previous, previous_at)?;
            return Err(ApplicationError::WriteRejected {
                id: variant,
                reason: e.to_string(),
            }
            .into());
        }
        Ok(())
    }
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
    use super::*;
    use tempfile::TempDir;

    fn catalog_variants() -> InMemoryVariantStore {
        let store = InMemoryVariantStore::new();
        for sku in ["11K001-UTS-01", "11K001-UTS-02"] {
            store
                .insert(VariantRecord::new(VariantId::from_name(sku), sku))
                .unwrap();
        }
        store
    }

    #[test]
    fn assignments_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state/assignments.json");
        let file = PrintFileId::new();

        let store = JsonVariantStore::open(&path, catalog_variants()).unwrap();
        store
            .set_print_file(VariantId::from_name("11K001-UTS-02"), file)
            .unwrap();
        assert!(path.exists());

        let reopened = JsonVariantStore::open(&path, catalog_variants()).unwrap();
        let listed = reopened
            .list_variants(&"11K001".parse().unwrap())
            .unwrap();
        assert_eq!(listed[0].print_file_id, None);
        assert_eq!(listed[1].print_file_id, Some(file));
    }

    #[test]
    fn failed_save_leaves_assignments_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assignments.json");
        let variant = VariantId::from_name("11K001-UTS-01");
        let first = PrintFileId::new();

        let store = JsonVariantStore::open(&path, catalog_variants()).unwrap();
        store.set_print_file(variant, first).unwrap();
        let saved_at = store.inner.updated_at(variant).unwrap();

        // A directory at the target path makes the rename fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let err = store.set_print_file(variant, PrintFileId::new()).unwrap_err();
        assert!(matches!(
            err,
            PrintMatchError::Application(ApplicationError::WriteRejected { .. })
        ));

        let listed = store.list_variants(&"11K001".parse().unwrap()).unwrap();
        assert_eq!(listed[0].print_file_id, Some(first));
        assert_eq!(store.inner.updated_at(variant).unwrap(), saved_at);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn save_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assignments.json");

        let store = JsonVariantStore::open(&path, catalog_variants()).unwrap();
        store
            .set_print_file(VariantId::from_name("11K001-UTS-01"), PrintFileId::new())
            .unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["assignments.json"]);
    }

    #[test]
    fn corrupt_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assignments.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonVariantStore::open(&path, catalog_variants())
            .err()
            .unwrap();
        assert!(err.is_retryable());
    }
}
