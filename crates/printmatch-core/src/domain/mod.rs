//! Core domain layer for printmatch.
//!
//! This module contains pure business logic. All I/O is handled via ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or store calls
//! - **No logging**: Observability belongs to the application layer
//! - **Validated values**: Codes can only exist in their well-formed state
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod generation;
pub mod matching;
pub mod registry;
pub mod scoring;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    HierarchyBinding, NoMatch, PrintFile, ProductType, Sku, SkuFragment, SkuPattern,
    VariantDimension, VariantHierarchy, VariantRecord, sku::decode,
};

pub use error::{DomainError, ErrorCategory};

pub use generation::generate_skus;
pub use matching::{DecodeMismatch, FileMatch, MatchLevel, classify, match_file, resolve};
pub use registry::{HierarchyRegistry, OrderedDimension};
pub use scoring::{Confidence, MatchCandidate, rank, score};

pub use value_objects::{ArtworkCode, DimensionId, PrintFileId, ProductTypeCode, VariantCode, VariantId};
