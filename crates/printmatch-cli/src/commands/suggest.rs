//! `printmatch suggest`: rank print files against an artwork's variants.

use tracing::{info, instrument};

use printmatch_core::{
    application::{SuggestionReport, SuggestionService},
    domain::{ArtworkCode, MatchCandidate},
    error::PrintMatchError,
};

use crate::{
    cli::SuggestArgs,
    commands::Sources,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(artwork = %args.artwork))]
pub fn execute(args: SuggestArgs, output: OutputManager, config: &AppConfig) -> CliResult<()> {
    let artwork: ArtworkCode = args.artwork.parse().map_err(PrintMatchError::from)?;
    let sources = Sources::open(&args.source, config)?;

    let report = suggest(&sources, &artwork, &args.skus, args.min_score)?;
    info!(candidates = report.candidates.len(), "Suggestions ready");

    if output.is_json() {
        output.json(&report)?;
    } else {
        render(&report, &output)?;
    }
    Ok(())
}

/// Run the suggestion service and drop candidates under `min_score`.
pub(crate) fn suggest(
    sources: &Sources,
    artwork: &ArtworkCode,
    targets: &[String],
    min_score: Option<u8>,
) -> CliResult<SuggestionReport> {
    let service = SuggestionService::new(
        sources.variant_store(),
        sources.file_store(),
        sources.registry(),
    );
    let mut report = service.suggest(artwork, targets)?;
    if let Some(min) = min_score {
        report.candidates.retain(|c| c.score >= min);
    }
    Ok(report)
}

fn render(report: &SuggestionReport, output: &OutputManager) -> CliResult<()> {
    output.header(&format!(
        "Suggestions for {} ({} target variants)",
        report.artwork, report.target_count
    ))?;

    if report.candidates.is_empty() {
        output.warning("No print file matches these variants")?;
    }
    for candidate in &report.candidates {
        render_candidate(candidate, output)?;
    }

    if !report.unparsed.is_empty() {
        output.print("")?;
        output.warning(&format!(
            "{} file(s) carry no SKU prefix:",
            report.unparsed.len()
        ))?;
        for file in &report.unparsed {
            output.detail(&format!("{} ({})", file.file_name, file.reason))?;
        }
    }
    Ok(())
}

fn render_candidate(candidate: &MatchCandidate, output: &OutputManager) -> CliResult<()> {
    let line = format!(
        "[{:>3}] {:<12} {}  \u{2192} {} variant(s)",
        candidate.score,
        candidate.confidence,
        candidate.file_name,
        candidate.variant_ids.len()
    );
    if candidate.score >= 100 {
        output.success(&line)?;
    } else {
        output.info(&line)?;
    }

    for reason in &candidate.reasons {
        output.detail(reason)?;
    }
    if !candidate.tags.is_empty() {
        output.detail(&format!("tags: {}", candidate.tags.join(", ")))?;
    }
    output.detail(&format!("id: {}", candidate.file_id))?;
    Ok(())
}
