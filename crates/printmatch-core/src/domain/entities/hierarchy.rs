//! Variant dimensions and their ordered binding to a product type.
//!
//! A product type owns at most three [`HierarchyBinding`]s. The position of a
//! binding is the index of its SKU field, so positions are kept dense
//! (`1..=n`) through every mutation: binding may only append or fill the
//! next free slot, while unbinding and reordering renumber from 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::sku::MAX_FIELDS,
    error::DomainError,
    value_objects::{DimensionId, ProductTypeCode, VariantCode},
};

/// Highest hierarchy position.
pub const MAX_POSITION: u8 = MAX_FIELDS as u8;

// ── Dimension ───────────────────────────────────────────────────────────────

/// A named axis of variation ("Size", "Material") with its code list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDimension {
    pub id: DimensionId,
    pub name: String,
    codes: BTreeMap<VariantCode, String>,
}

impl VariantDimension {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(DimensionId::new(), name)
    }

    pub fn with_id(id: DimensionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            codes: BTreeMap::new(),
        }
    }

    /// Add a code with its display label.
    pub fn add_code(&mut self, code: VariantCode, label: impl Into<String>) -> Result<(), DomainError> {
        if self.codes.contains_key(&code) {
            return Err(DomainError::Duplicate {
                kind: "variant code",
                value: format!("{} in {}", code, self.name),
            });
        }
        self.codes.insert(code, label.into());
        Ok(())
    }

    /// Builder-style [`Self::add_code`].
    pub fn with_code(mut self, code: VariantCode, label: impl Into<String>) -> Result<Self, DomainError> {
        self.add_code(code, label)?;
        Ok(self)
    }

    /// Codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = VariantCode> + '_ {
        self.codes.keys().copied()
    }

    pub fn label(&self, code: VariantCode) -> Option<&str> {
        self.codes.get(&code).map(String::as_str)
    }

    pub fn code_count(&self) -> usize {
        self.codes.len()
    }
}

// ── Product type ────────────────────────────────────────────────────────────

/// A kind of product an artwork can be instantiated as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub code: ProductTypeCode,
    pub name: String,
    pub active: bool,
    pub sort_order: i32,
}

impl ProductType {
    pub fn new(code: ProductTypeCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            active: true,
            sort_order: 0,
        }
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

// ── Binding ─────────────────────────────────────────────────────────────────

/// One dimension placed at one position of a product type's hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyBinding {
    pub position: u8,
    pub dimension_id: DimensionId,
    pub required: bool,
    pub allow_multiple: bool,
}

/// The ordered bindings of a single product type.
///
/// Invariants:
/// - at most [`MAX_POSITION`] bindings
/// - positions are exactly `1..=len`, sorted
/// - a dimension appears at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantHierarchy {
    product_type: ProductTypeCode,
    bindings: Vec<HierarchyBinding>,
}

impl VariantHierarchy {
    pub fn new(product_type: ProductTypeCode) -> Self {
        Self {
            product_type,
            bindings: Vec::with_capacity(MAX_FIELDS),
        }
    }

    pub fn product_type(&self) -> &ProductTypeCode {
        &self.product_type
    }

    /// Bindings in position order.
    pub fn bindings(&self) -> &[HierarchyBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn contains(&self, dimension: DimensionId) -> bool {
        self.bindings.iter().any(|b| b.dimension_id == dimension)
    }

    /// Place `dimension` at `position`.
    ///
    /// Nothing is changed unless every check passes.
    pub fn bind(
        &mut self,
        dimension: &VariantDimension,
        position: u8,
        required: bool,
        allow_multiple: bool,
    ) -> Result<(), DomainError> {
        if !(1..=MAX_POSITION).contains(&position) {
            return Err(DomainError::PositionOutOfRange { position });
        }
        if self.bindings.len() >= MAX_FIELDS {
            return Err(DomainError::MaxBindingsExceeded {
                product_type: self.product_type.to_string(),
            });
        }
        if self.contains(dimension.id) {
            return Err(DomainError::DimensionAlreadyBound {
                product_type: self.product_type.to_string(),
                dimension: dimension.name.clone(),
            });
        }
        if self.bindings.iter().any(|b| b.position == position) {
            return Err(DomainError::PositionOccupied {
                product_type: self.product_type.to_string(),
                position,
            });
        }
        let next = self.next_position();
        if position != next {
            return Err(DomainError::PositionGap {
                product_type: self.product_type.to_string(),
                position,
                next,
            });
        }

        self.bindings.push(HierarchyBinding {
            position,
            dimension_id: dimension.id,
            required,
            allow_multiple,
        });
        Ok(())
    }

    /// Remove `dimension` and close the gap it leaves.
    pub fn unbind(&mut self, dimension: &VariantDimension) -> Result<HierarchyBinding, DomainError> {
        let index = self
            .bindings
            .iter()
            .position(|b| b.dimension_id == dimension.id)
            .ok_or_else(|| DomainError::DimensionNotBound {
                product_type: self.product_type.to_string(),
                dimension: dimension.name.clone(),
            })?;
        let removed = self.bindings.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Drop any binding of `dimension` without failing when absent.
    pub(crate) fn purge(&mut self, dimension: DimensionId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.dimension_id != dimension);
        self.renumber();
        before != self.bindings.len()
    }

    /// Reassign positions to follow `order`, which must name every bound
    /// dimension exactly once.
    pub fn reorder(&mut self, order: &[DimensionId]) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidReorder {
            product_type: self.product_type.to_string(),
            reason,
        };
        if order.len() != self.bindings.len() {
            return Err(invalid(format!(
                "expected {} dimensions, got {}",
                self.bindings.len(),
                order.len()
            )));
        }

        let mut reordered = Vec::with_capacity(order.len());
        for id in order {
            let binding = self
                .bindings
                .iter()
                .find(|b| b.dimension_id == *id)
                .ok_or_else(|| invalid(format!("dimension {id} is not bound")))?;
            if reordered.iter().any(|b: &HierarchyBinding| b.dimension_id == *id) {
                return Err(invalid(format!("dimension {id} listed twice")));
            }
            reordered.push(*binding);
        }

        self.bindings = reordered;
        self.renumber();
        Ok(())
    }

    fn next_position(&self) -> u8 {
        // len <= 3, checked by callers
        self.bindings.len() as u8 + 1
    }

    /// Rewrite positions as `1..=len` following the current list order.
    fn renumber(&mut self) {
        for (binding, position) in self.bindings.iter_mut().zip(1..) {
            binding.position = position;
        }
    }
}
