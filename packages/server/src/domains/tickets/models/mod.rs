pub mod status;
pub mod ticket;
pub mod ticket_history;

pub use status::{HistoryAction, TicketStatus};
pub use ticket::{NewTicket, Ticket};
pub use ticket_history::{HistoryEntry, NewHistoryEntry, TicketHistory};
