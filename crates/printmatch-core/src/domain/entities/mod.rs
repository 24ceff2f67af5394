pub mod hierarchy;
pub mod sku;
pub mod variant;

pub use hierarchy::{HierarchyBinding, ProductType, VariantDimension, VariantHierarchy};
pub use sku::{NoMatch, Sku, SkuFragment, SkuPattern};
pub use variant::{PrintFile, VariantRecord};
