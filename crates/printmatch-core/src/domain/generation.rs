//! Variant expansion for a new product.
//!
//! When an artwork is instantiated as a product type, one variant exists per
//! combination of codes across the bound dimensions, with fields in binding
//! order.

use crate::domain::{
    entities::Sku,
    error::DomainError,
    registry::HierarchyRegistry,
    value_objects::{ArtworkCode, ProductTypeCode, VariantCode},
};

/// Every SKU of `artwork` as `product_type`, in ascending code order.
///
/// A product type without bindings yields the single product-level SKU.
pub fn generate_skus(
    registry: &HierarchyRegistry,
    artwork: &ArtworkCode,
    product_type: &ProductTypeCode,
) -> Result<Vec<Sku>, DomainError> {
    if registry.product_type(product_type).is_none() {
        return Err(DomainError::UnknownProductType(product_type.to_string()));
    }

    let mut combinations: Vec<Vec<VariantCode>> = vec![Vec::new()];
    for ordered in registry.ordered_dimensions(product_type) {
        let codes: Vec<VariantCode> = ordered.dimension.codes().collect();
        if codes.is_empty() {
            return Err(DomainError::EmptyDimension {
                dimension: ordered.dimension.name.clone(),
            });
        }
        combinations = combinations
            .into_iter()
            .flat_map(|prefix| {
                codes.iter().map(move |code| {
                    let mut next = prefix.clone();
                    next.push(*code);
                    next
                })
            })
            .collect();
    }

    combinations
        .into_iter()
        .map(|fields| Sku::new(artwork.clone(), product_type.clone(), fields))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductType, VariantDimension};

    fn dimension(name: &str, codes: &[&str]) -> VariantDimension {
        codes.iter().fold(VariantDimension::new(name), |d, c| {
            d.with_code(c.parse().unwrap(), *c).unwrap()
        })
    }

    #[test]
    fn expands_all_combinations_in_binding_order() {
        let mut reg = HierarchyRegistry::new();
        let uts: ProductTypeCode = "UTS".parse().unwrap();
        reg.add_product_type(ProductType::new(uts.clone(), "T-Shirt")).unwrap();
        let size = reg.add_dimension(dimension("Size", &["01", "02"])).unwrap();
        let finish = reg.add_dimension(dimension("Finish", &["05", "07"])).unwrap();
        reg.bind_dimension(&uts, size, 1, true, false).unwrap();
        reg.bind_dimension(&uts, finish, 2, true, false).unwrap();

        let skus: Vec<String> = generate_skus(&reg, &"11K001".parse().unwrap(), &uts)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            skus,
            vec![
                "11K001-UTS-01-05",
                "11K001-UTS-01-07",
                "11K001-UTS-02-05",
                "11K001-UTS-02-07",
            ]
        );
    }

    #[test]
    fn unbound_type_yields_product_level_sku() {
        let mut reg = HierarchyRegistry::new();
        let pos: ProductTypeCode = "POS".parse().unwrap();
        reg.add_product_type(ProductType::new(pos.clone(), "Poster")).unwrap();

        let skus = generate_skus(&reg, &"11K001".parse().unwrap(), &pos).unwrap();
        assert_eq!(skus.len(), 1);
        assert_eq!(skus[0].to_string(), "11K001-POS");
    }

    #[test]
    fn empty_dimension_is_rejected() {
        let mut reg = HierarchyRegistry::new();
        let uts: ProductTypeCode = "UTS".parse().unwrap();
        reg.add_product_type(ProductType::new(uts.clone(), "T-Shirt")).unwrap();
        let size = reg.add_dimension(VariantDimension::new("Size")).unwrap();
        reg.bind_dimension(&uts, size, 1, true, false).unwrap();

        assert!(matches!(
            generate_skus(&reg, &"11K001".parse().unwrap(), &uts),
            Err(DomainError::EmptyDimension { .. })
        ));
        assert!(matches!(
            generate_skus(&reg, &"11K001".parse().unwrap(), &"ABC".parse().unwrap()),
            Err(DomainError::UnknownProductType(_))
        ));
    }
}
