//! Ticket actions - entry points for the lifecycle operations
//!
//! Each mutating action runs its ticket update and history append in one
//! transaction and notifies the customer only after commit.

pub mod create_complaint;
pub mod escalate;
pub mod queries;
pub mod record_feedback;
pub mod update_status;

pub use create_complaint::{create_complaint, CreatedTicket};
pub use escalate::{escalate, Escalated};
pub use queries::{
    assigned_tickets, feedback_eligibility, find_ticket, staff_profile_for, ticket_detail,
};
pub use record_feedback::{record_feedback, FeedbackOutcome};
pub use update_status::{update_status, StatusChanged};
