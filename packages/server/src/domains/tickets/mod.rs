//! Tickets domain - complaint intake and the staff lifecycle
//!
//! NEW → IN_PROGRESS → ESCALATED → RESOLVED → CLOSED, with every change
//! recorded in an append-only history.

pub mod actions;
pub mod data;
pub mod errors;
pub mod forms;
pub mod lifecycle;
pub mod models;
pub mod ticket_number;

pub use errors::TicketError;
pub use forms::{ComplaintForm, FeedbackForm, TicketAction, TicketActionForm};
pub use models::{HistoryAction, Ticket, TicketHistory, TicketStatus};
