// Domain modules

pub mod accounts;
pub mod categories;
pub mod customers;
pub mod notifications;
pub mod reporting;
pub mod staff;
pub mod tickets;
