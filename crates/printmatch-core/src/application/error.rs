//! Failures of the services and the stores behind the ports.
//!
//! Rule violations in the hierarchy or codec are `DomainError`s instead.

use thiserror::Error;

use crate::domain::VariantId;
use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A store could not be reached at all.
    #[error("{store} unavailable: {reason}")]
    StoreUnavailable { store: &'static str, reason: String },

    /// An in-process store's lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    StoreLockError,

    /// A write addressed a variant the store does not hold.
    #[error("Variant not found: {id}")]
    VariantNotFound { id: VariantId },

    /// A single write was refused by the store.
    #[error("Write rejected for variant {id}: {reason}")]
    WriteRejected { id: VariantId, reason: String },

    /// A catalog description could not be read or understood.
    #[error("Invalid catalog '{origin}': {reason}")]
    CatalogInvalid { origin: String, reason: String },
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StoreUnavailable { store, .. } => vec![
                format!("The {store} could not be reached"),
                "Nothing was written; re-run the same request once it is back".into(),
            ],
            Self::StoreLockError => vec!["Restart the process; in-memory state is lost".into()],
            Self::VariantNotFound { .. } => vec![
                "The variant list changed since it was read".into(),
                "Refresh suggestions and apply again".into(),
            ],
            Self::CatalogInvalid { origin, .. } => vec![
                format!("Check the syntax of {origin}"),
                "Dimension names in bindings must match a [[dimensions]] entry".into(),
            ],
            Self::WriteRejected { .. } => vec![
                "Other variants in the batch were still written".into(),
                "Apply the same files again to retry".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StoreUnavailable { .. } => ErrorCategory::Unavailable,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::VariantNotFound { .. } => ErrorCategory::NotFound,
            Self::WriteRejected { .. } => ErrorCategory::Conflict,
            Self::CatalogInvalid { .. } => ErrorCategory::Validation,
        }
    }
}
