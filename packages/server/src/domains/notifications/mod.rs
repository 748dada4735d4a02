//! Notifications domain - customer emails on ticket creation, escalation and resolution

pub mod dispatcher;
pub mod messages;

pub use dispatcher::{DeliveryOutcome, NotificationDispatcher};
