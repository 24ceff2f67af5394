//! Assignment Service - writes approved print files onto variants.
//!
//! The client only sends print-file ids. Matching is recomputed from the
//! current stores so a stale suggestion can never write an outdated pairing.
//! Writes are independent: one failure does not roll back the others.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{AssignmentListener, PrintFileStore, VariantStore},
    domain::{
        ArtworkCode, FileMatch, HierarchyRegistry, MatchLevel, PrintFile, PrintFileId, SkuPattern,
        VariantId, VariantRecord, match_file, resolve,
    },
    error::PrintMatchResult,
};

/// One variant-to-file write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAssignment {
    pub variant_id: VariantId,
    pub full_sku: String,
    pub print_file_id: PrintFileId,
    pub file_name: String,
    pub match_level: MatchLevel,
}

/// Writes an apply would perform, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentPlan {
    pub assignments: Vec<PlannedAssignment>,
    pub unmatched_files: usize,
    /// Variants targeted by more than one approved file. The last one wins.
    pub overlapping_variants: Vec<VariantId>,
}

/// The first write that failed during an apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFailure {
    pub variant_id: VariantId,
    pub print_file_id: PrintFileId,
    pub message: String,
}

/// Outcome of an apply batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Successful writes. A variant in `overlapping_variants` is counted
    /// once per file that wrote it.
    pub assigned: usize,
    pub unmatched_files: usize,
    pub failed: usize,
    pub first_error: Option<WriteFailure>,
    pub overlapping_variants: Vec<VariantId>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.unmatched_files == 0
    }
}

/// Applies operator-approved print files.
pub struct AssignmentService {
    variants: Box<dyn VariantStore>,
    files: Box<dyn PrintFileStore>,
    registry: HierarchyRegistry,
    listener: Option<Box<dyn AssignmentListener>>,
}

impl AssignmentService {
    pub fn new(
        variants: Box<dyn VariantStore>,
        files: Box<dyn PrintFileStore>,
        registry: HierarchyRegistry,
    ) -> Self {
        Self {
            variants,
            files,
            registry,
            listener: None,
        }
    }

    /// Notify `listener` after every apply.
    pub fn with_listener(mut self, listener: Box<dyn AssignmentListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Compute the writes `approved` would cause, without writing.
    #[instrument(skip_all, fields(artwork = %artwork, approved = approved.len()))]
    pub fn plan(
        &self,
        artwork: &ArtworkCode,
        approved: &[PrintFileId],
    ) -> PrintMatchResult<AssignmentPlan> {
        let files = self.files.list_print_files(artwork)?;
        let variants = self.variants.list_variants(artwork)?;
        Ok(self.build_plan(&files, &variants, approved))
    }

    /// Assign every approved file to the variants its name selects.
    ///
    /// Fails only when a store cannot be listed. Individual write failures
    /// are counted in the report and the batch carries on.
    #[instrument(skip_all, fields(artwork = %artwork, approved = approved.len()))]
    pub fn apply(
        &self,
        artwork: &ArtworkCode,
        approved: &[PrintFileId],
    ) -> PrintMatchResult<ApplyReport> {
        let plan = self.plan(artwork, approved)?;

        if !plan.overlapping_variants.is_empty() {
            warn!(
                variants = plan.overlapping_variants.len(),
                "Several approved files target the same variants; last write wins"
            );
        }

        let mut report = ApplyReport {
            unmatched_files: plan.unmatched_files,
            overlapping_variants: plan.overlapping_variants.clone(),
            ..ApplyReport::default()
        };

        for planned in &plan.assignments {
            match self
                .variants
                .set_print_file(planned.variant_id, planned.print_file_id)
            {
                Ok(()) => {
                    debug!(sku = %planned.full_sku, file = %planned.file_name, "Assigned");
                    report.assigned += 1;
                }
                Err(e) => {
                    warn!(sku = %planned.full_sku, error = %e, "Assignment failed");
                    report.failed += 1;
                    report.first_error.get_or_insert_with(|| WriteFailure {
                        variant_id: planned.variant_id,
                        print_file_id: planned.print_file_id,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            assigned = report.assigned,
            failed = report.failed,
            unmatched = report.unmatched_files,
            "Apply finished"
        );

        if let Some(listener) = &self.listener {
            listener.assignments_applied(artwork, &report);
        }

        Ok(report)
    }

    fn build_plan(
        &self,
        files: &[PrintFile],
        variants: &[VariantRecord],
        approved: &[PrintFileId],
    ) -> AssignmentPlan {
        let by_id: HashMap<PrintFileId, &PrintFile> = files.iter().map(|f| (f.id, f)).collect();
        let mut seen_files = HashSet::new();
        let mut targeted: HashMap<VariantId, PrintFileId> = HashMap::new();
        let mut plan = AssignmentPlan::default();

        for id in approved {
            if !seen_files.insert(*id) {
                continue;
            }
            let Some(file) = by_id.get(id) else {
                debug!(file_id = %id, "Approved file not found for artwork");
                plan.unmatched_files += 1;
                continue;
            };

            let (pattern, level) = match match_file(file, &self.registry) {
                FileMatch::Matched { fragment, level } => (SkuPattern::from(fragment), level),
                FileMatch::Unparsed(reason) => {
                    debug!(file = %file.file_name, %reason, "Approved file no longer parses");
                    plan.unmatched_files += 1;
                    continue;
                }
                FileMatch::Mismatch(mismatch) => {
                    debug!(file = %file.file_name, %mismatch, "Approved file no longer fits");
                    plan.unmatched_files += 1;
                    continue;
                }
            };

            let covered = resolve(&pattern, variants);
            if covered.is_empty() {
                debug!(file = %file.file_name, %pattern, "Approved file matches no variant");
                plan.unmatched_files += 1;
                continue;
            }

            for variant in covered {
                let previous = targeted.insert(variant.id, file.id);
                if previous.is_some_and(|p| p != file.id)
                    && !plan.overlapping_variants.contains(&variant.id)
                {
                    plan.overlapping_variants.push(variant.id);
                }
                plan.assignments.push(PlannedAssignment {
                    variant_id: variant.id,
                    full_sku: variant.full_sku.clone(),
                    print_file_id: file.id,
                    file_name: file.file_name.clone(),
                    match_level: level,
                });
            }
        }

        plan
    }
}
