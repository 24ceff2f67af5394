//! `printmatch apply`: write approved print files onto variants.
//!
//! Files are approved by id or by name, or in bulk with `--min-score`.
//! The plan is shown before anything is written.

use std::collections::BTreeSet;

use tracing::{debug, info, instrument};

use printmatch_adapters::TracingListener;
use printmatch_core::{
    application::{ApplyReport, AssignmentPlan, AssignmentService},
    domain::{ArtworkCode, PrintFile, PrintFileId},
    error::PrintMatchError,
};

use crate::{
    cli::ApplyArgs,
    commands::{Sources, confirm, suggest},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(artwork = %args.artwork, dry_run = args.dry_run))]
pub fn execute(args: ApplyArgs, output: OutputManager, config: &AppConfig) -> CliResult<()> {
    let artwork: ArtworkCode = args.artwork.parse().map_err(PrintMatchError::from)?;
    let sources = Sources::open(&args.source, config)?;

    let approved = approved_ids(&sources, &artwork, &args)?;
    if approved.is_empty() {
        return Err(CliError::NothingToApply {
            artwork: artwork.to_string(),
        });
    }
    debug!(approved = approved.len(), "Approved files resolved");

    let service = AssignmentService::new(
        sources.variant_store(),
        sources.file_store(),
        sources.registry(),
    )
    .with_listener(Box::new(TracingListener::new()));

    let plan = service.plan(&artwork, &approved)?;

    if args.dry_run {
        if output.is_json() {
            output.json(&plan)?;
        } else {
            render_plan(&plan, &output)?;
            output.info("Dry run: nothing was written")?;
        }
        return Ok(());
    }

    if !output.is_json() {
        render_plan(&plan, &output)?;
    }

    let must_confirm = config.apply.confirm && !args.yes && !output.is_quiet();
    if must_confirm && !plan.assignments.is_empty() {
        let prompt = format!("Assign {} variant(s)?", plan.assignments.len());
        if !confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    let report = service.apply(&artwork, &approved)?;
    info!(assigned = report.assigned, failed = report.failed, "Apply finished");

    if output.is_json() {
        output.json(&report)?;
    } else {
        render_report(&report, &output)?;
    }

    match &report.first_error {
        Some(first) if report.failed > 0 => Err(CliError::ApplyIncomplete {
            failed: report.failed,
            attempted: report.assigned + report.failed,
            first_error: first.message.clone(),
        }),
        _ => Ok(()),
    }
}

/// Explicit approvals plus every suggestion at or above `--min-score`.
fn approved_ids(
    sources: &Sources,
    artwork: &ArtworkCode,
    args: &ApplyArgs,
) -> CliResult<Vec<PrintFileId>> {
    let mut ids = Vec::new();
    let mut seen = BTreeSet::new();

    if !args.approved.is_empty() {
        let files = sources.file_store().list_print_files(artwork)?;
        for reference in &args.approved {
            let id = resolve_reference(artwork, reference, &files)?;
            if seen.insert(id) {
                ids.push(id);
            }
        }
    }

    if let Some(min) = args.min_score {
        let report = suggest::suggest(sources, artwork, &[], Some(min))?;
        for candidate in report.candidates {
            if seen.insert(candidate.file_id) {
                ids.push(candidate.file_id);
            }
        }
    }

    Ok(ids)
}

/// A reference is an id when it parses as one, otherwise a file name.
fn resolve_reference(
    artwork: &ArtworkCode,
    reference: &str,
    files: &[PrintFile],
) -> CliResult<PrintFileId> {
    if let Ok(id) = reference.parse::<PrintFileId>() {
        return Ok(id);
    }

    let mut named = files.iter().filter(|f| f.file_name == reference);
    match (named.next(), named.next()) {
        (Some(file), None) => Ok(file.id),
        (Some(_), Some(_)) => Err(CliError::InvalidInput {
            message: format!("'{reference}' names several print files; approve by id instead"),
            source: None,
        }),
        (None, _) => Err(CliError::UnknownPrintFile {
            artwork: artwork.to_string(),
            reference: reference.to_owned(),
        }),
    }
}

fn render_plan(plan: &AssignmentPlan, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("{} planned assignment(s)", plan.assignments.len()))?;
    for planned in &plan.assignments {
        output.print(&format!(
            "  {} \u{2190} {} ({})",
            planned.full_sku, planned.file_name, planned.match_level
        ))?;
    }
    if !plan.overlapping_variants.is_empty() {
        output.warning(&format!(
            "{} variant(s) are covered by more than one approved file; the last one wins",
            plan.overlapping_variants.len()
        ))?;
    }
    if plan.unmatched_files > 0 {
        output.warning(&format!(
            "{} approved file(s) match no variant",
            plan.unmatched_files
        ))?;
    }
    Ok(())
}

fn render_report(report: &ApplyReport, output: &OutputManager) -> CliResult<()> {
    if report.assigned > 0 {
        output.success(&format!("Made {} assignment(s)", report.assigned))?;
    }
    if report.unmatched_files > 0 {
        output.warning(&format!(
            "{} file(s) were not matched",
            report.unmatched_files
        ))?;
    }
    if let Some(first) = &report.first_error {
        output.warning(&format!(
            "{} write(s) failed; first: {}",
            report.failed, first.message
        ))?;
    }
    if report.is_clean() && report.assigned == 0 {
        output.info("Nothing changed")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> Vec<PrintFile> {
        vec![
            PrintFile::new(PrintFileId::from_name("a"), "11K001-UTS-01_print.png", "image/png"),
            PrintFile::new(PrintFileId::from_name("b"), "dup.png", "image/png"),
            PrintFile::new(PrintFileId::from_name("c"), "dup.png", "image/png"),
        ]
    }

    fn artwork() -> ArtworkCode {
        "11K001".parse().unwrap()
    }

    #[test]
    fn reference_by_name() {
        let id = resolve_reference(&artwork(), "11K001-UTS-01_print.png", &files()).unwrap();
        assert_eq!(id, PrintFileId::from_name("a"));
    }

    #[test]
    fn reference_by_id_is_taken_as_is() {
        let wanted = PrintFileId::from_name("elsewhere");
        let id = resolve_reference(&artwork(), &wanted.to_string(), &files()).unwrap();
        assert_eq!(id, wanted);
    }

    #[test]
    fn ambiguous_name_is_rejected() {
        let err = resolve_reference(&artwork(), "dup.png", &files()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = resolve_reference(&artwork(), "missing.png", &files()).unwrap_err();
        assert!(matches!(err, CliError::UnknownPrintFile { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
