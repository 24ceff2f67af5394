//! SKU codec and print-file auto-assignment engine.
//!
//! Layers, innermost first:
//!
//! - [`domain`]: SKU grammar, variant hierarchy, match classification and
//!   scoring. Pure functions over owned data; nothing here logs or does I/O.
//! - [`application`]: [`SuggestionService`](application::SuggestionService)
//!   and [`AssignmentService`](application::AssignmentService), plus the
//!   store ports they talk through.
//! - [`error`]: the error type every fallible call returns.
//!
//! Store implementations live in `printmatch-adapters`; the `printmatch`
//! binary wires both together.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use printmatch_core::prelude::*;
//!
//! # fn run(
//! #     variants: Box<dyn VariantStore>,
//! #     files: Box<dyn PrintFileStore>,
//! #     registry: HierarchyRegistry,
//! # ) -> PrintMatchResult<()> {
//! let artwork: ArtworkCode = "11K001".parse()?;
//!
//! let service = AssignmentService::new(variants, files, registry);
//! let report = service.apply(&artwork, &[])?;
//! println!("assigned {} variants", report.assigned);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Everything a caller of the services needs.
pub mod prelude {
    pub use crate::application::{
        ApplyReport, AssignmentPlan, AssignmentService, SuggestionReport, SuggestionService,
        ports::{AssignmentListener, PrintFileStore, VariantStore},
    };
    pub use crate::domain::{
        ArtworkCode, Confidence, DimensionId, HierarchyBinding, HierarchyRegistry, MatchCandidate,
        MatchLevel, PrintFile, PrintFileId, ProductType, ProductTypeCode, Sku, SkuFragment,
        SkuPattern, VariantCode, VariantDimension, VariantId, VariantRecord, decode,
        generate_skus,
    };
    pub use crate::error::{PrintMatchError, PrintMatchResult};
}
