// DISCO Complaints Portal - API Core
//
// Customers file complaints against the electricity distribution company,
// staff triage, escalate and resolve them, and leadership reads an
// aggregate dashboard. Domain logic lives in domains/*; the HTTP surface
// lives in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
