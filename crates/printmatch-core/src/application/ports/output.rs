//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `printmatch-adapters` crate provides implementations.

#[cfg(test)]
use mockall::automock;

use crate::application::services::ApplyReport;
use crate::domain::{ArtworkCode, PrintFile, PrintFileId, VariantId, VariantRecord};
use crate::error::PrintMatchResult;

/// Port for the persistent variant store.
///
/// Implemented by:
/// - `printmatch_adapters::store::InMemoryVariantStore`
///
/// The assignment engine depends on exactly these two operations.
#[cfg_attr(test, automock)]
pub trait VariantStore: Send + Sync {
    /// All variants of an artwork, across product types.
    fn list_variants(&self, artwork: &ArtworkCode) -> PrintMatchResult<Vec<VariantRecord>>;

    /// Point a variant at a print file, replacing any previous assignment.
    fn set_print_file(&self, variant: VariantId, print_file: PrintFileId) -> PrintMatchResult<()>;
}

/// Port for uploaded print-file records.
///
/// Implemented by:
/// - `printmatch_adapters::print_files::InMemoryFileStore`
/// - `printmatch_adapters::print_files::LocalFileStore`
#[cfg_attr(test, automock)]
pub trait PrintFileStore: Send + Sync {
    /// Print files uploaded for an artwork. File contents are never read.
    fn list_print_files(&self, artwork: &ArtworkCode) -> PrintMatchResult<Vec<PrintFile>>;
}

/// Port notified after every apply batch (cache invalidation, webhooks).
///
/// Implemented by:
/// - `printmatch_adapters::listener::TracingListener`
#[cfg_attr(test, automock)]
pub trait AssignmentListener: Send + Sync {
    fn assignments_applied(&self, artwork: &ArtworkCode, report: &ApplyReport);
}
