//! Reporting domain - the leadership dashboard
//!
//! Read-only aggregates, derived fresh from the tickets table per request.

pub mod dashboard;
pub mod duration;
pub mod filter;

pub use dashboard::{build_dashboard, DashboardReport, OPEN_TICKET_LIMIT};
pub use filter::{DashboardFilter, DashboardQuery};
