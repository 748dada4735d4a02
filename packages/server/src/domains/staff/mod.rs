//! Staff domain - staff profiles used for ticket assignment and escalation

pub mod models;

// Re-export commonly used types
pub use models::{CreateStaffUser, StaffMember, StaffUser};
