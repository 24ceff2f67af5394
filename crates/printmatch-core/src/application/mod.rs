//! Application layer: use cases composed from domain logic and ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{AssignmentListener, PrintFileStore, VariantStore};
pub use services::{
    ApplyReport, AssignmentPlan, AssignmentService, PlannedAssignment, SuggestionReport,
    SuggestionService, UnparsedFile, WriteFailure,
};
