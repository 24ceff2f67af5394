//! Assignment listener that reports batches through `tracing`.

use tracing::{info, warn};

use printmatch_core::{
    application::{ApplyReport, ports::AssignmentListener},
    domain::ArtworkCode,
};

/// Emits one event per apply batch, for log-based cache invalidation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl TracingListener {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentListener for TracingListener {
    fn assignments_applied(&self, artwork: &ArtworkCode, report: &ApplyReport) {
        if let Some(first) = &report.first_error {
            warn!(
                %artwork,
                failed = report.failed,
                variant = %first.variant_id,
                error = %first.message,
                "Apply batch had failed writes"
            );
        }
        info!(
            target: "printmatch::assignments",
            %artwork,
            assigned = report.assigned,
            unmatched = report.unmatched_files,
            overlapping = report.overlapping_variants.len(),
            "Variant print files changed"
        );
    }
}
