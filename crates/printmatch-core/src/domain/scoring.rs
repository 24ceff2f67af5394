//! Match scoring and explanation.
//!
//! Scores are a fixed function of [`MatchLevel`]. Confidence labels are a
//! presentation cutoff over the score and are kept in their own constants so
//! display policy can move without touching classification.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::{PrintFile, SkuFragment, VariantRecord},
    matching::MatchLevel,
    registry::HierarchyRegistry,
    value_objects::{PrintFileId, VariantId},
};

// ── Score table ─────────────────────────────────────────────────────────────

pub const SCORE_EXACT_3D: u8 = 100;
pub const SCORE_EXACT_2D: u8 = 90;
pub const SCORE_HIERARCHICAL_VAR1: u8 = 75;
pub const SCORE_PRODUCT_LEVEL: u8 = 70;

pub const fn score(level: MatchLevel) -> u8 {
    match level {
        MatchLevel::Exact3d => SCORE_EXACT_3D,
        MatchLevel::Exact2d => SCORE_EXACT_2D,
        MatchLevel::HierarchicalVar1 => SCORE_HIERARCHICAL_VAR1,
        MatchLevel::ProductLevel => SCORE_PRODUCT_LEVEL,
    }
}

// ── Display thresholds ──────────────────────────────────────────────────────

pub const EXACT_MATCH_THRESHOLD: u8 = 100;
pub const HIERARCHICAL_THRESHOLD: u8 = 90;
pub const PRODUCT_LEVEL_THRESHOLD: u8 = 70;

/// Confidence band shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Confidence {
    Low,
    ProductLevel,
    Hierarchical,
    Exact,
}

impl Confidence {
    pub const fn from_score(score: u8) -> Self {
        if score >= EXACT_MATCH_THRESHOLD {
            Self::Exact
        } else if score >= HIERARCHICAL_THRESHOLD {
            Self::Hierarchical
        } else if score >= PRODUCT_LEVEL_THRESHOLD {
            Self::ProductLevel
        } else {
            Self::Low
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exact => "Exact Match",
            Self::Hierarchical => "Hierarchical",
            Self::ProductLevel => "Product-Level",
            Self::Low => "Low Confidence",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Candidate ───────────────────────────────────────────────────────────────

/// A print file paired with the target variants it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchCandidate {
    pub file_id: PrintFileId,
    pub file_name: String,
    pub tags: Vec<String>,
    pub match_level: MatchLevel,
    pub score: u8,
    pub confidence: Confidence,
    pub reasons: Vec<String>,
    pub variant_ids: Vec<VariantId>,
    pub variant_skus: Vec<String>,
}

impl MatchCandidate {
    /// Score and explain a matched file against the targets it covers.
    pub fn new(
        file: &PrintFile,
        fragment: &SkuFragment,
        level: MatchLevel,
        registry: &HierarchyRegistry,
        covered: &[&VariantRecord],
        target_count: usize,
    ) -> Self {
        let score = score(level);
        Self {
            file_id: file.id,
            file_name: file.file_name.clone(),
            tags: file.tags.clone(),
            match_level: level,
            score,
            confidence: Confidence::from_score(score),
            reasons: explain(fragment, level, registry, covered.len(), target_count),
            variant_ids: covered.iter().map(|v| v.id).collect(),
            variant_skus: covered.iter().map(|v| v.full_sku.clone()).collect(),
        }
    }
}

/// Ordered, human-readable reasons for a match.
///
/// The first line always names the matched parts and the level.
pub fn explain(
    fragment: &SkuFragment,
    level: MatchLevel,
    registry: &HierarchyRegistry,
    covered: usize,
    target_count: usize,
) -> Vec<String> {
    let mut reasons = vec![format!(
        "Matched {} ({})",
        level.matched_parts(),
        level.group()
    )];

    let dimensions = registry.ordered_dimensions(fragment.product_type_code());
    for (index, code) in fragment.prefix().fields().iter().enumerate() {
        let reason = match dimensions.get(index) {
            Some(d) => match d.dimension.label(*code) {
                Some(label) => format!("Field{} = {} ({}: {})", index + 1, code, d.dimension.name, label),
                None => format!("Field{} = {} ({})", index + 1, code, d.dimension.name),
            },
            None => format!("Field{} = {}", index + 1, code),
        };
        reasons.push(reason);
    }

    reasons.push(format!("Covers {covered} of {target_count} target variants"));
    reasons
}

/// Highest score first, then file name. Equal scores are all kept.
pub fn rank(candidates: &mut [MatchCandidate]) {
    candidates.sort_by(|a, b| match b.score.cmp(&a.score) {
        Ordering::Equal => a.file_name.cmp(&b.file_name),
        other => other,
    });
}
