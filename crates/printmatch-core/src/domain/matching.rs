//! Filename pattern matching.
//!
//! Turns a print file's name into a [`FileMatch`]: either a decoded SKU
//! prefix with its [`MatchLevel`], or the reason it was excluded. The level
//! depends only on how many fields were decoded relative to how many
//! dimensions the product type binds.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    entities::{NoMatch, PrintFile, SkuFragment, SkuPattern, VariantRecord, sku},
    registry::HierarchyRegistry,
};

/// How specific a file-to-variant inference is.
///
/// Ordered from least to most specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchLevel {
    #[serde(rename = "product_level")]
    ProductLevel,
    #[serde(rename = "hierarchical_var1")]
    HierarchicalVar1,
    #[serde(rename = "exact_2d")]
    Exact2d,
    #[serde(rename = "exact_3d")]
    Exact3d,
}

impl MatchLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProductLevel => "product_level",
            Self::HierarchicalVar1 => "hierarchical_var1",
            Self::Exact2d => "exact_2d",
            Self::Exact3d => "exact_3d",
        }
    }

    /// Which SKU parts a file at this level pins down.
    pub const fn matched_parts(&self) -> &'static str {
        match self {
            Self::ProductLevel => "Artwork+Type",
            Self::HierarchicalVar1 => "Artwork+Type+Field1",
            Self::Exact2d => "Artwork+Type+Field1+Field2",
            Self::Exact3d => "Artwork+Type+Field1+Field2+Field3",
        }
    }

    pub const fn group(&self) -> &'static str {
        match self {
            Self::ProductLevel => "all variants",
            Self::HierarchicalVar1 => "Field1 group",
            Self::Exact2d => "2D group",
            Self::Exact3d => "exact variant",
        }
    }
}

impl fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file decoded more fields than its product type has dimensions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("decoded {decoded} fields but the product type binds {bound} dimensions")]
pub struct DecodeMismatch {
    pub decoded: usize,
    pub bound: usize,
}

/// Classify a decoded field count against the bound dimension count.
pub fn classify(decoded: usize, bound: usize) -> Result<MatchLevel, DecodeMismatch> {
    let mismatch = DecodeMismatch { decoded, bound };
    if decoded > bound {
        return Err(mismatch);
    }
    match decoded {
        0 => Ok(MatchLevel::ProductLevel),
        1 => Ok(MatchLevel::HierarchicalVar1),
        2 => Ok(MatchLevel::Exact2d),
        3 => Ok(MatchLevel::Exact3d),
        _ => Err(mismatch),
    }
}

/// Outcome of matching one file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMatch {
    /// The name carries no SKU prefix.
    Unparsed(NoMatch),
    /// The prefix is deeper than the product type's hierarchy.
    Mismatch(DecodeMismatch),
    Matched {
        fragment: SkuFragment,
        level: MatchLevel,
    },
}

impl FileMatch {
    /// Selection pattern for a matched file.
    pub fn pattern(&self) -> Option<SkuPattern> {
        match self {
            Self::Matched { fragment, .. } => Some(SkuPattern::new(fragment.prefix().clone())),
            _ => None,
        }
    }
}

/// Decode and classify a print file against the registry.
pub fn match_file(file: &PrintFile, registry: &HierarchyRegistry) -> FileMatch {
    let fragment = match sku::decode(&file.file_name) {
        Ok(fragment) => fragment,
        Err(reason) => return FileMatch::Unparsed(reason),
    };
    let bound = registry.bound_count(fragment.product_type_code());
    match classify(fragment.depth(), bound) {
        Ok(level) => FileMatch::Matched { fragment, level },
        Err(mismatch) => FileMatch::Mismatch(mismatch),
    }
}

/// Variants selected by `pattern`, in input order.
pub fn resolve<'a>(pattern: &SkuPattern, variants: &'a [VariantRecord]) -> Vec<&'a VariantRecord> {
    variants
        .iter()
        .filter(|v| pattern.matches_str(&v.full_sku))
        .collect()
}
