//! [`PrintMatchError`] is what every fallible core call returns. It keeps the
//! layer an error came from and exposes suggestions and a coarse category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum PrintMatchError {
    /// A codec or hierarchy rule was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A store or catalog failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl PrintMatchError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Whether re-running the same call may succeed.
    ///
    /// Nothing retries automatically; this only informs the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::StoreUnavailable { .. })
                | Self::Application(ApplicationError::StoreLockError)
        )
    }
}

/// Coarse classification, mapped to exit codes by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Unavailable,
    Internal,
}

pub type PrintMatchResult<T> = Result<T, PrintMatchError>;
