//! Application services (use case implementations).

pub mod assignment_service;
pub mod suggestion_service;

pub use assignment_service::{
    ApplyReport, AssignmentPlan, AssignmentService, PlannedAssignment, WriteFailure,
};
pub use suggestion_service::{SuggestionReport, SuggestionService, UnparsedFile};
