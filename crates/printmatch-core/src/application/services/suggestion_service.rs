//! Suggestion Service - which print files fit which variants.
//!
//! Composes the filename matcher and the scorer:
//! 1. List the artwork's print files and variants
//! 2. Decode and classify every file name
//! 3. Resolve each matched prefix against the target variants
//! 4. Score, explain, and rank the candidates
//!
//! Nothing is written. Output is meant for operator review.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{PrintFileStore, VariantStore},
    domain::{
        ArtworkCode, FileMatch, HierarchyRegistry, MatchCandidate, SkuPattern, VariantRecord,
        match_file, rank, resolve,
    },
    error::PrintMatchResult,
};

/// A file whose name carries no SKU prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnparsedFile {
    pub file_name: String,
    pub reason: String,
}

/// Ranked candidates for one artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionReport {
    pub artwork: ArtworkCode,
    pub target_count: usize,
    pub candidates: Vec<MatchCandidate>,
    pub unparsed: Vec<UnparsedFile>,
}

/// Computes print-file suggestions.
pub struct SuggestionService {
    variants: Box<dyn VariantStore>,
    files: Box<dyn PrintFileStore>,
    registry: HierarchyRegistry,
}

impl SuggestionService {
    pub fn new(
        variants: Box<dyn VariantStore>,
        files: Box<dyn PrintFileStore>,
        registry: HierarchyRegistry,
    ) -> Self {
        Self {
            variants,
            files,
            registry,
        }
    }

    /// Suggest print files for `targets` (full SKUs) of `artwork`.
    ///
    /// An empty target list means every variant of the artwork. Targets the
    /// variant store does not know are ignored.
    #[instrument(skip_all, fields(artwork = %artwork, targets = targets.len()))]
    pub fn suggest(
        &self,
        artwork: &ArtworkCode,
        targets: &[String],
    ) -> PrintMatchResult<SuggestionReport> {
        let variants = self.target_variants(artwork, targets)?;
        let files = self.files.list_print_files(artwork)?;
        debug!(files = files.len(), variants = variants.len(), "Inputs loaded");

        let mut candidates = Vec::new();
        let mut unparsed = Vec::new();

        for file in &files {
            match match_file(file, &self.registry) {
                FileMatch::Unparsed(reason) => {
                    info!(file = %file.file_name, %reason, "File name not parsed");
                    unparsed.push(UnparsedFile {
                        file_name: file.file_name.clone(),
                        reason: reason.to_string(),
                    });
                }
                FileMatch::Mismatch(mismatch) => {
                    debug!(file = %file.file_name, %mismatch, "File excluded");
                }
                FileMatch::Matched { fragment, level } => {
                    let pattern = SkuPattern::new(fragment.prefix().clone());
                    let covered = resolve(&pattern, &variants);
                    if covered.is_empty() {
                        debug!(file = %file.file_name, %pattern, "No target variant under prefix");
                        continue;
                    }
                    candidates.push(MatchCandidate::new(
                        file,
                        &fragment,
                        level,
                        &self.registry,
                        &covered,
                        variants.len(),
                    ));
                }
            }
        }

        rank(&mut candidates);
        info!(
            candidates = candidates.len(),
            unparsed = unparsed.len(),
            "Suggestions computed"
        );

        Ok(SuggestionReport {
            artwork: artwork.clone(),
            target_count: variants.len(),
            candidates,
            unparsed,
        })
    }

    fn target_variants(
        &self,
        artwork: &ArtworkCode,
        targets: &[String],
    ) -> PrintMatchResult<Vec<VariantRecord>> {
        let all = self.variants.list_variants(artwork)?;
        if targets.is_empty() {
            return Ok(all);
        }

        let wanted: HashSet<&str> = targets.iter().map(String::as_str).collect();
        let selected: Vec<VariantRecord> = all
            .into_iter()
            .filter(|v| wanted.contains(v.full_sku.as_str()))
            .collect();
        if selected.len() < wanted.len() {
            debug!(
                requested = wanted.len(),
                known = selected.len(),
                "Some target SKUs are not in the variant store"
            );
        }
        Ok(selected)
    }
}
