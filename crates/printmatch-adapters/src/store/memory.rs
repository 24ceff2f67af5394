//! In-memory variant store.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::debug;

use printmatch_core::{
    application::{ApplicationError, ports::VariantStore},
    domain::{ArtworkCode, DomainError, PrintFileId, VariantId, VariantRecord},
    error::PrintMatchResult,
};

#[derive(Debug, Clone)]
struct StoredVariant {
    record: VariantRecord,
    updated_at: Option<DateTime<Utc>>,
}

/// Thread-safe in-memory variant store. Keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVariantStore {
    inner: Arc<RwLock<Vec<StoredVariant>>>,
}

impl InMemoryVariantStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant. Ids and full SKUs must be unique.
    pub fn insert(&self, record: VariantRecord) -> PrintMatchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner
            .iter()
            .any(|v| v.record.id == record.id || v.record.full_sku == record.full_sku)
        {
            return Err(DomainError::Duplicate {
                kind: "variant",
                value: record.full_sku,
            }
            .into());
        }

        inner.push(StoredVariant {
            record,
            updated_at: None,
        });
        Ok(())
    }

    /// Get the number of variants.
    pub fn len(&self) -> usize {
        self.inner.read().map(|v| v.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: VariantId) -> PrintMatchResult<Option<VariantRecord>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner
            .iter()
            .find(|v| v.record.id == id)
            .map(|v| v.record.clone()))
    }

    pub fn find_by_sku(&self, full_sku: &str) -> PrintMatchResult<Option<VariantRecord>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner
            .iter()
            .find(|v| v.record.full_sku == full_sku)
            .map(|v| v.record.clone()))
    }

    /// When the variant's print file was last written, if ever.
    pub fn updated_at(&self, id: VariantId) -> PrintMatchResult<Option<DateTime<Utc>>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner
            .iter()
            .find(|v| v.record.id == id)
            .and_then(|v| v.updated_at))
    }

    /// Every record with its last write time, in insertion order.
    pub(crate) fn assignments(
        &self,
    ) -> PrintMatchResult<Vec<(VariantRecord, Option<DateTime<Utc>>)>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner
            .iter()
            .map(|v| (v.record.clone(), v.updated_at))
            .collect())
    }

    /// Restore a previously persisted assignment without touching the clock.
    pub(crate) fn restore(
        &self,
        full_sku: &str,
        print_file: PrintFileId,
        updated_at: Option<DateTime<Utc>>,
    ) -> PrintMatchResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        match inner.iter_mut().find(|v| v.record.full_sku == full_sku) {
            Some(stored) => {
                stored.record.print_file_id = Some(print_file);
                stored.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Put back a variant's assignment as it was before a rejected write.
    pub(crate) fn revert(
        &self,
        id: VariantId,
        print_file: Option<PrintFileId>,
        updated_at: Option<DateTime<Utc>>,
    ) -> PrintMatchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        if let Some(stored) = inner.iter_mut().find(|v| v.record.id == id) {
            stored.record.print_file_id = print_file;
            stored.updated_at = updated_at;
        }
        Ok(())
    }
}

impl VariantStore for InMemoryVariantStore {
    fn list_variants(&self, artwork: &ArtworkCode) -> PrintMatchResult<Vec<VariantRecord>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner
            .iter()
            .filter(|v| v.record.full_sku.split('-').next() == Some(artwork.as_str()))
            .map(|v| v.record.clone())
            .collect())
    }

    fn set_print_file(&self, variant: VariantId, print_file: PrintFileId) -> PrintMatchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let stored = inner
            .iter_mut()
            .find(|v| v.record.id == variant)
            .ok_or(ApplicationError::VariantNotFound { id: variant })?;

        stored.record.print_file_id = Some(print_file);
        stored.updated_at = Some(Utc::now());
        debug!(sku = %stored.record.full_sku, %print_file, "Print file set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sku: &str) -> VariantRecord {
        VariantRecord::new(VariantId::from_name(sku), sku)
    }

    #[test]
    fn lists_by_artwork_segment() {
        let store = InMemoryVariantStore::new();
        store.insert(record("11K001-UTS-01")).unwrap();
        store.insert(record("11K0010-UTS-01")).unwrap();
        store.insert(record("22B002-UTS-01")).unwrap();

        let listed = store.list_variants(&"11K001".parse().unwrap()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].full_sku, "11K001-UTS-01");
    }

    #[test]
    fn rejects_duplicate_skus() {
        let store = InMemoryVariantStore::new();
        store.insert(record("11K001-UTS")).unwrap();
        let err = store
            .insert(VariantRecord::new(VariantId::new(), "11K001-UTS"))
            .unwrap_err();
        assert!(err.to_string().contains("11K001-UTS"));
    }

    #[test]
    fn set_print_file_stamps_time() {
        let store = InMemoryVariantStore::new();
        let variant = record("11K001-UTS-01");
        store.insert(variant.clone()).unwrap();
        let file = PrintFileId::new();

        store.set_print_file(variant.id, file).unwrap();

        let stored = store.get(variant.id).unwrap().unwrap();
        assert_eq!(stored.print_file_id, Some(file));
        assert!(store.updated_at(variant.id).unwrap().is_some());
    }

    #[test]
    fn unknown_variant_is_not_found() {
        let store = InMemoryVariantStore::new();
        let err = store
            .set_print_file(VariantId::new(), PrintFileId::new())
            .unwrap_err();
        assert_eq!(
            err.category(),
            printmatch_core::error::ErrorCategory::NotFound
        );
    }
}
