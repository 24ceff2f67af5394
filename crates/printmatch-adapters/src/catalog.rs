//! TOML catalog loader.
//!
//! A catalog describes the variant hierarchy configuration and the variants
//! that exist, and loads into a [`HierarchyRegistry`] plus an
//! [`InMemoryVariantStore`].
//!
//! # `catalog.toml` format
//!
//! ```toml
//! [[dimensions]]
//! name  = "Size"
//! codes = { "01" = "S", "02" = "M" }
//!
//! [[dimensions]]
//! name  = "Finish"
//! codes = { "01" = "Matte" }
//!
//! [[product_types]]
//! code       = "UTS"
//! name       = "Unisex T-Shirt"
//! sort_order = 1                     # optional
//! active     = true                  # optional
//! bindings   = [
//!   { dimension = "Size" },          # position defaults to list order
//!   { dimension = "Finish", position = 2, required = false },
//! ]
//!
//! # Every combination of bound codes for an artwork.
//! [[generate]]
//! artwork      = "11K001"
//! product_type = "UTS"
//!
//! # Or individual variants.
//! [[variants]]
//! sku        = "22B002-UTS-01-01"
//! print_file = "…uuid…"              # optional existing assignment
//! ```
//!
//! Variant ids are derived from the SKU (UUID v5) unless given explicitly.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use tracing::{debug, instrument};

use printmatch_core::{
    application::ApplicationError,
    domain::{
        ArtworkCode, DimensionId, HierarchyRegistry, PrintFileId, ProductType, ProductTypeCode,
        Sku, VariantCode, VariantDimension, VariantId, VariantRecord, generate_skus,
    },
    error::{PrintMatchError, PrintMatchResult},
};

use crate::store::InMemoryVariantStore;

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a catalog file.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    #[serde(default)]
    pub dimensions: Vec<DimensionEntry>,
    #[serde(default)]
    pub product_types: Vec<ProductTypeEntry>,
    #[serde(default)]
    pub generate: Vec<GenerateEntry>,
    #[serde(default)]
    pub variants: Vec<VariantEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct DimensionEntry {
    pub name: String,
    /// Two-digit code to display label.
    #[serde(default)]
    pub codes: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProductTypeEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub bindings: Vec<BindingEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BindingEntry {
    pub dimension: String,
    pub position: Option<u8>,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub allow_multiple: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct GenerateEntry {
    pub artwork: String,
    pub product_type: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct VariantEntry {
    pub sku: String,
    pub id: Option<VariantId>,
    pub print_file: Option<PrintFileId>,
}

fn default_true() -> bool {
    true
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// A loaded catalog: hierarchy configuration plus variant rows.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub registry: HierarchyRegistry,
    pub variants: InMemoryVariantStore,
}

impl Catalog {
    /// Load a catalog file.
    #[instrument(fields(path = %path.as_ref().display()), skip(path))]
    pub fn load(path: impl AsRef<Path>) -> PrintMatchResult<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|e| invalid(&origin, e))?;
        Self::from_toml_str(&raw, &origin)
    }

    /// Parse catalog text. `origin` names the source in error messages.
    pub fn from_toml_str(raw: &str, origin: &str) -> PrintMatchResult<Self> {
        let manifest: CatalogManifest = toml::from_str(raw).map_err(|e| invalid(origin, e))?;
        Self::from_manifest(manifest, origin)
    }

    pub fn from_manifest(manifest: CatalogManifest, origin: &str) -> PrintMatchResult<Self> {
        let mut registry = HierarchyRegistry::new();

        for entry in &manifest.dimensions {
            let mut dimension =
                VariantDimension::with_id(DimensionId::from_name(&entry.name), &entry.name);
            for (code, label) in &entry.codes {
                dimension.add_code(code.parse::<VariantCode>()?, label)?;
            }
            registry.add_dimension(dimension)?;
        }

        for entry in &manifest.product_types {
            let code: ProductTypeCode = entry.code.parse()?;
            let mut product_type =
                ProductType::new(code.clone(), &entry.name).with_sort_order(entry.sort_order);
            if !entry.active {
                product_type = product_type.inactive();
            }
            registry.add_product_type(product_type)?;

            for (index, binding) in entry.bindings.iter().enumerate() {
                let dimension = registry
                    .dimension_by_name(&binding.dimension)
                    .map(|d| d.id)
                    .ok_or_else(|| {
                        invalid(
                            origin,
                            format!(
                                "product type {code} binds unknown dimension '{}'",
                                binding.dimension
                            ),
                        )
                    })?;
                let position = match binding.position {
                    Some(position) => position,
                    None => u8::try_from(index + 1).unwrap_or(u8::MAX),
                };
                registry.bind_dimension(
                    &code,
                    dimension,
                    position,
                    binding.required,
                    binding.allow_multiple,
                )?;
            }
        }

        let variants = InMemoryVariantStore::new();

        for entry in &manifest.generate {
            let artwork: ArtworkCode = entry.artwork.parse()?;
            let product_type: ProductTypeCode = entry.product_type.parse()?;
            let skus = generate_skus(&registry, &artwork, &product_type)?;
            debug!(%artwork, %product_type, count = skus.len(), "Variants generated");
            for sku in skus {
                let sku = sku.to_string();
                variants.insert(VariantRecord::new(VariantId::from_name(&sku), sku))?;
            }
        }

        for entry in &manifest.variants {
            let sku = Sku::parse(&entry.sku)?.to_string();
            let id = entry.id.unwrap_or_else(|| VariantId::from_name(&sku));
            let mut record = VariantRecord::new(id, sku);
            record.print_file_id = entry.print_file;
            variants.insert(record)?;
        }

        debug!(
            dimensions = manifest.dimensions.len(),
            product_types = manifest.product_types.len(),
            variants = variants.len(),
            "Catalog loaded"
        );

        Ok(Self { registry, variants })
    }
}

fn invalid(origin: &str, e: impl std::fmt::Display) -> PrintMatchError {
    ApplicationError::CatalogInvalid {
        origin: origin.to_owned(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use printmatch_core::application::ports::VariantStore;

    const CATALOG: &str = r#"
        [[dimensions]]
        name = "Size"
        codes = { "01" = "S", "02" = "M" }

        [[dimensions]]
        name = "Finish"
        codes = { "01" = "Matte", "02" = "Gloss" }

        [[product_types]]
        code = "UTS"
        name = "Unisex T-Shirt"
        bindings = [{ dimension = "Size" }, { dimension = "finish" }]

        [[product_types]]
        code = "PST"
        name = "Poster"
        sort_order = -1

        [[generate]]
        artwork = "11K001"
        product_type = "UTS"

        [[variants]]
        sku = "11K001-PST"
    "#;

    #[test]
    fn loads_hierarchy_and_variants() {
        let catalog = Catalog::from_toml_str(CATALOG, "test").unwrap();
        let uts: ProductTypeCode = "UTS".parse().unwrap();

        assert_eq!(catalog.registry.bound_count(&uts), 2);
        let names: Vec<_> = catalog
            .registry
            .ordered_dimensions(&uts)
            .iter()
            .map(|d| d.dimension.name.clone())
            .collect();
        assert_eq!(names, vec!["Size", "Finish"]);
        assert_eq!(catalog.registry.product_types()[0].code.as_str(), "PST");

        let listed = catalog
            .variants
            .list_variants(&"11K001".parse().unwrap())
            .unwrap();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].full_sku, "11K001-UTS-01-01");
        assert_eq!(listed[0].id, VariantId::from_name("11K001-UTS-01-01"));
    }

    #[test]
    fn unknown_binding_dimension_is_invalid() {
        let raw = r#"
            [[product_types]]
            code = "UTS"
            name = "Shirt"
            bindings = [{ dimension = "Colour" }]
        "#;
        let err = Catalog::from_toml_str(raw, "inline").unwrap_err();
        assert!(err.to_string().contains("Colour"));
    }

    #[test]
    fn domain_rules_apply_while_loading() {
        let raw = r#"
            [[dimensions]]
            name = "Size"
            codes = { "99" = "reserved" }
        "#;
        let err = Catalog::from_toml_str(raw, "inline").unwrap_err();
        assert!(matches!(err, PrintMatchError::Domain(_)));
    }

    #[test]
    fn gap_in_positions_is_rejected() {
        let raw = r#"
            [[dimensions]]
            name = "Size"
            codes = { "01" = "S" }

            [[product_types]]
            code = "UTS"
            name = "Shirt"
            bindings = [{ dimension = "Size", position = 2 }]
        "#;
        assert!(Catalog::from_toml_str(raw, "inline").is_err());
    }
}
