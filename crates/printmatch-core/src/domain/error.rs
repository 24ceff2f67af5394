// ============================================================================
// domain/error.rs - CONFIGURATION-TIME VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for aggregation into batch reports)
/// - Categorizable (for CLI display)
/// - Actionable (names the rule and the offending value)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Codec Errors
    // ========================================================================
    #[error("invalid {field} '{value}': {rule}")]
    InvalidCodeFormat {
        field: &'static str,
        value: String,
        rule: &'static str,
    },

    // ========================================================================
    // Hierarchy Binding Errors
    // ========================================================================
    #[error("position {position} of product type '{product_type}' is already bound")]
    PositionOccupied { product_type: String, position: u8 },

    #[error("position {position} is out of range: positions must be 1, 2 or 3")]
    PositionOutOfRange { position: u8 },

    #[error("product type '{product_type}' already has 3 bound dimensions")]
    MaxBindingsExceeded { product_type: String },

    #[error(
        "position {position} of product type '{product_type}' would leave a gap: next free position is {next}"
    )]
    PositionGap {
        product_type: String,
        position: u8,
        next: u8,
    },

    #[error("dimension '{dimension}' is already bound to product type '{product_type}'")]
    DimensionAlreadyBound {
        product_type: String,
        dimension: String,
    },

    #[error("dimension '{dimension}' is not bound to product type '{product_type}'")]
    DimensionNotBound {
        product_type: String,
        dimension: String,
    },

    #[error("invalid reorder for product type '{product_type}': {reason}")]
    InvalidReorder {
        product_type: String,
        reason: String,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("unknown product type: {0}")]
    UnknownProductType(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("dimension '{dimension}' has no codes to expand")]
    EmptyDimension { dimension: String },

    #[error("duplicate {kind} '{value}'")]
    Duplicate { kind: &'static str, value: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidCodeFormat { field, rule, .. } => vec![
                format!("A {field} must match: {rule}"),
                "Examples: artwork 11K001, product type UTS, variant code 01".into(),
            ],
            Self::PositionOccupied { position, .. } => vec![
                format!("Unbind the dimension at position {position} first"),
                "Or reorder the existing bindings".into(),
            ],
            Self::PositionOutOfRange { .. } => {
                vec!["A product type has at most three ordered dimension slots: 1, 2, 3".into()]
            }
            Self::MaxBindingsExceeded { product_type } => vec![
                format!("'{product_type}' already uses all three variant fields"),
                "Unbind a dimension before binding another".into(),
            ],
            Self::PositionGap { next, .. } => vec![
                format!("Bind at position {next} instead"),
                "Positions define SKU field order and must stay contiguous".into(),
            ],
            Self::InvalidReorder { .. } => {
                vec!["Pass every bound dimension exactly once, in the new order".into()]
            }
            Self::EmptyDimension { dimension } => {
                vec![format!("Add at least one code to dimension '{dimension}'")]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCodeFormat { .. } | Self::PositionOutOfRange { .. } => {
                ErrorCategory::Validation
            }
            Self::PositionOccupied { .. }
            | Self::MaxBindingsExceeded { .. }
            | Self::PositionGap { .. }
            | Self::DimensionAlreadyBound { .. }
            | Self::InvalidReorder { .. }
            | Self::Duplicate { .. } => ErrorCategory::Conflict,
            Self::UnknownDimension(_)
            | Self::UnknownProductType(_)
            | Self::DimensionNotBound { .. } => ErrorCategory::NotFound,
            Self::EmptyDimension { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
}
