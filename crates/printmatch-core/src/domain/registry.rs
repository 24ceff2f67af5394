//! The variant hierarchy registry.
//!
//! Holds the catalog's configuration data: dimensions with their codes,
//! product types, and the ordered dimension bindings of each product type.
//! Every mutation validates before it writes, so a rejected call leaves the
//! registry untouched.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    entities::{HierarchyBinding, ProductType, VariantDimension, VariantHierarchy},
    error::DomainError,
    value_objects::{DimensionId, ProductTypeCode, VariantCode},
};

/// A binding joined with the dimension it refers to.
#[derive(Debug, Clone, Copy)]
pub struct OrderedDimension<'a> {
    pub binding: &'a HierarchyBinding,
    pub dimension: &'a VariantDimension,
}

impl OrderedDimension<'_> {
    pub fn position(&self) -> u8 {
        self.binding.position
    }
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyRegistry {
    dimensions: HashMap<DimensionId, VariantDimension>,
    product_types: BTreeMap<ProductTypeCode, ProductType>,
    hierarchies: HashMap<ProductTypeCode, VariantHierarchy>,
}

impl HierarchyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Dimensions ──────────────────────────────────────────────────────────

    /// Register a dimension. Names are unique, case-insensitively.
    pub fn add_dimension(&mut self, dimension: VariantDimension) -> Result<DimensionId, DomainError> {
        if self.dimensions.contains_key(&dimension.id)
            || self.dimension_by_name(&dimension.name).is_some()
        {
            return Err(DomainError::Duplicate {
                kind: "dimension",
                value: dimension.name,
            });
        }
        let id = dimension.id;
        self.dimensions.insert(id, dimension);
        Ok(id)
    }

    pub fn dimension(&self, id: DimensionId) -> Option<&VariantDimension> {
        self.dimensions.get(&id)
    }

    pub fn dimension_by_name(&self, name: &str) -> Option<&VariantDimension> {
        self.dimensions
            .values()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn add_dimension_code(
        &mut self,
        id: DimensionId,
        code: VariantCode,
        label: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.dimensions
            .get_mut(&id)
            .ok_or_else(|| DomainError::UnknownDimension(id.to_string()))?
            .add_code(code, label)
    }

    /// Delete a dimension and every binding that uses it.
    pub fn remove_dimension(&mut self, id: DimensionId) -> Result<VariantDimension, DomainError> {
        let dimension = self
            .dimensions
            .remove(&id)
            .ok_or_else(|| DomainError::UnknownDimension(id.to_string()))?;
        for hierarchy in self.hierarchies.values_mut() {
            hierarchy.purge(id);
        }
        Ok(dimension)
    }

    // ── Product types ───────────────────────────────────────────────────────

    pub fn add_product_type(&mut self, product_type: ProductType) -> Result<(), DomainError> {
        if self.product_types.contains_key(&product_type.code) {
            return Err(DomainError::Duplicate {
                kind: "product type",
                value: product_type.code.to_string(),
            });
        }
        self.hierarchies.insert(
            product_type.code.clone(),
            VariantHierarchy::new(product_type.code.clone()),
        );
        self.product_types
            .insert(product_type.code.clone(), product_type);
        Ok(())
    }

    pub fn product_type(&self, code: &ProductTypeCode) -> Option<&ProductType> {
        self.product_types.get(code)
    }

    /// Product types by `sort_order`, then code.
    pub fn product_types(&self) -> Vec<&ProductType> {
        let mut types: Vec<_> = self.product_types.values().collect();
        types.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.code.cmp(&b.code)));
        types
    }

    // ── Bindings ────────────────────────────────────────────────────────────

    pub fn bind_dimension(
        &mut self,
        product_type: &ProductTypeCode,
        dimension: DimensionId,
        position: u8,
        required: bool,
        allow_multiple: bool,
    ) -> Result<(), DomainError> {
        let dimension = self
            .dimensions
            .get(&dimension)
            .ok_or_else(|| DomainError::UnknownDimension(dimension.to_string()))?;
        self.hierarchies
            .get_mut(product_type)
            .ok_or_else(|| DomainError::UnknownProductType(product_type.to_string()))?
            .bind(dimension, position, required, allow_multiple)
    }

    pub fn unbind_dimension(
        &mut self,
        product_type: &ProductTypeCode,
        dimension: DimensionId,
    ) -> Result<HierarchyBinding, DomainError> {
        let dimension = self
            .dimensions
            .get(&dimension)
            .ok_or_else(|| DomainError::UnknownDimension(dimension.to_string()))?;
        self.hierarchies
            .get_mut(product_type)
            .ok_or_else(|| DomainError::UnknownProductType(product_type.to_string()))?
            .unbind(dimension)
    }

    pub fn reorder(
        &mut self,
        product_type: &ProductTypeCode,
        order: &[DimensionId],
    ) -> Result<(), DomainError> {
        self.hierarchies
            .get_mut(product_type)
            .ok_or_else(|| DomainError::UnknownProductType(product_type.to_string()))?
            .reorder(order)
    }

    /// Raw bindings in position order; empty for unknown product types.
    pub fn bindings(&self, product_type: &ProductTypeCode) -> &[HierarchyBinding] {
        self.hierarchies
            .get(product_type)
            .map(VariantHierarchy::bindings)
            .unwrap_or(&[])
    }

    /// Number of bound dimensions, i.e. the SKU field count of the type.
    pub fn bound_count(&self, product_type: &ProductTypeCode) -> usize {
        self.bindings(product_type).len()
    }

    /// The binding sequence with resolved dimensions, in codec field order.
    pub fn ordered_dimensions(&self, product_type: &ProductTypeCode) -> Vec<OrderedDimension<'_>> {
        self.bindings(product_type)
            .iter()
            .filter_map(|binding| {
                self.dimensions
                    .get(&binding.dimension_id)
                    .map(|dimension| OrderedDimension { binding, dimension })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uts() -> ProductTypeCode {
        "UTS".parse().unwrap()
    }

    fn registry() -> (HierarchyRegistry, [DimensionId; 3]) {
        let mut reg = HierarchyRegistry::new();
        reg.add_product_type(ProductType::new(uts(), "T-Shirt")).unwrap();
        let size = reg.add_dimension(VariantDimension::new("Size")).unwrap();
        let material = reg.add_dimension(VariantDimension::new("Material")).unwrap();
        let finish = reg.add_dimension(VariantDimension::new("Finish")).unwrap();
        (reg, [size, material, finish])
    }

    #[test]
    fn ordered_dimensions_follow_positions() {
        let (mut reg, [size, material, finish]) = registry();
        reg.bind_dimension(&uts(), size, 1, true, false).unwrap();
        reg.bind_dimension(&uts(), material, 2, true, false).unwrap();
        reg.bind_dimension(&uts(), finish, 3, false, false).unwrap();

        let names: Vec<_> = reg
            .ordered_dimensions(&uts())
            .iter()
            .map(|d| d.dimension.name.as_str())
            .collect();
        assert_eq!(names, vec!["Size", "Material", "Finish"]);
        assert_eq!(reg.bound_count(&uts()), 3);
    }

    #[test]
    fn reorder_changes_codec_field_order() {
        let (mut reg, [size, material, _]) = registry();
        reg.bind_dimension(&uts(), size, 1, true, false).unwrap();
        reg.bind_dimension(&uts(), material, 2, true, false).unwrap();

        reg.reorder(&uts(), &[material, size]).unwrap();

        let names: Vec<_> = reg
            .ordered_dimensions(&uts())
            .iter()
            .map(|d| (d.binding.position, d.dimension.name.as_str()))
            .collect();
        assert_eq!(names, vec![(1, "Material"), (2, "Size")]);
    }

    #[test]
    fn unknown_references_are_rejected() {
        let (mut reg, [size, ..]) = registry();
        let other: ProductTypeCode = "ABC".parse().unwrap();
        assert!(matches!(
            reg.bind_dimension(&other, size, 1, true, false),
            Err(DomainError::UnknownProductType(_))
        ));
        assert!(matches!(
            reg.bind_dimension(&uts(), DimensionId::new(), 1, true, false),
            Err(DomainError::UnknownDimension(_))
        ));
        assert!(reg.ordered_dimensions(&other).is_empty());
    }

    #[test]
    fn removing_a_dimension_cascades_to_bindings() {
        let (mut reg, [size, material, finish]) = registry();
        reg.bind_dimension(&uts(), size, 1, true, false).unwrap();
        reg.bind_dimension(&uts(), material, 2, true, false).unwrap();
        reg.bind_dimension(&uts(), finish, 3, true, false).unwrap();

        reg.remove_dimension(size).unwrap();

        let bindings = reg.bindings(&uts());
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].dimension_id, material);
        assert_eq!(bindings[0].position, 1);
        assert_eq!(bindings[1].position, 2);
    }

    #[test]
    fn duplicates_are_rejected() {
        let (mut reg, _) = registry();
        assert!(reg.add_dimension(VariantDimension::new("size")).is_err());
        assert!(reg.add_product_type(ProductType::new(uts(), "Again")).is_err());
    }

    #[test]
    fn product_types_sorted_by_sort_order() {
        let mut reg = HierarchyRegistry::new();
        reg.add_product_type(ProductType::new("BBB".parse().unwrap(), "B").with_sort_order(2))
            .unwrap();
        reg.add_product_type(ProductType::new("AAA".parse().unwrap(), "A").with_sort_order(5))
            .unwrap();
        reg.add_product_type(ProductType::new("CCC".parse().unwrap(), "C").with_sort_order(1))
            .unwrap();

        let codes: Vec<_> = reg.product_types().iter().map(|t| t.code.to_string()).collect();
        assert_eq!(codes, vec!["CCC", "BBB", "AAA"]);
    }
}
