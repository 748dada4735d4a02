//! Sends customer notifications through the configured mailer.
//!
//! Delivery is best effort: a failure is logged and reported back as
//! `DeliveryOutcome::Failed`, never as an error, and nothing is retried.

use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use crate::domains::customers::Customer;
use crate::domains::staff::StaffMember;
use crate::domains::tickets::models::Ticket;
use crate::kernel::{BaseMailer, OutboundEmail};

use super::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    Failed,
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn BaseMailer>,
    base_url: String,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn BaseMailer>, base_url: &str) -> Self {
        Self {
            mailer,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `<base>/feedback/<ticket number>/`
    pub fn feedback_link(&self, ticket_number: &str) -> String {
        let path = format!("feedback/{}/", ticket_number);
        Url::parse(&format!("{}/", self.base_url))
            .and_then(|base| base.join(&path))
            .map(String::from)
            .unwrap_or_else(|_| format!("{}/{}", self.base_url, path))
    }

    pub async fn acknowledge_created(
        &self,
        ticket: &Ticket,
        customer: &Customer,
        category_name: &str,
    ) -> DeliveryOutcome {
        let email = messages::acknowledgement(
            &customer.email,
            &customer.name,
            &ticket.ticket_number,
            category_name,
            &ticket.description,
        );
        self.deliver(&ticket.ticket_number, &email).await
    }

    pub async fn notify_escalated(
        &self,
        ticket: &Ticket,
        customer: &Customer,
        to_staff: &StaffMember,
    ) -> DeliveryOutcome {
        let email = messages::escalation(
            &customer.email,
            &customer.name,
            &ticket.ticket_number,
            to_staff.display_name(),
            &to_staff.role,
        );
        self.deliver(&ticket.ticket_number, &email).await
    }

    pub async fn notify_resolved(&self, ticket: &Ticket, customer: &Customer) -> DeliveryOutcome {
        let link = self.feedback_link(&ticket.ticket_number);
        let email = messages::resolution(
            &customer.email,
            &customer.name,
            &ticket.ticket_number,
            &link,
        );
        self.deliver(&ticket.ticket_number, &email).await
    }

    async fn deliver(&self, ticket_number: &str, email: &OutboundEmail) -> DeliveryOutcome {
        match self.mailer.send(email).await {
            Ok(()) => {
                info!(ticket = %ticket_number, to = %email.to, subject = %email.subject, "Notification sent");
                DeliveryOutcome::Sent
            }
            Err(e) => {
                warn!(
                    ticket = %ticket_number,
                    to = %email.to,
                    subject = %email.subject,
                    error = %e,
                    "Notification delivery failed"
                );
                DeliveryOutcome::Failed
            }
        }
    }
}
