//! Fixed plaintext templates for customer notifications.

use crate::kernel::OutboundEmail;

const SIGN_OFF: &str = "Regards,\nYour DISCO";

/// Sent right after a complaint is filed
pub fn acknowledgement(
    to: &str,
    customer_name: &str,
    ticket_number: &str,
    category_name: &str,
    description: &str,
) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: format!("Complaint Received - Ticket {}", ticket_number),
        body: format!(
            "Dear {customer_name},\n\n\
             We have received your complaint with Ticket ID: {ticket_number}.\n\
             Category: {category_name}\n\
             Description:\n{description}\n\n\
             Our team will attend to it and keep you updated.\n\n\
             {SIGN_OFF}"
        ),
    }
}

/// Sent when staff hand the ticket to someone else
pub fn escalation(
    to: &str,
    customer_name: &str,
    ticket_number: &str,
    staff_name: &str,
    staff_role: &str,
) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: format!("Your Complaint {} has been escalated", ticket_number),
        body: format!(
            "Dear {customer_name},\n\n\
             Your complaint with Ticket ID {ticket_number} has been escalated \
             to {staff_name} ({staff_role}).\n\n\
             We will keep you updated on further progress.\n\n\
             {SIGN_OFF}"
        ),
    }
}

/// Sent on every move into RESOLVED; carries the feedback link
pub fn resolution(
    to: &str,
    customer_name: &str,
    ticket_number: &str,
    feedback_link: &str,
) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: format!("Your Complaint {} has been resolved", ticket_number),
        body: format!(
            "Dear {customer_name},\n\n\
             Your complaint with Ticket ID {ticket_number} has been marked as resolved.\n\
             Please let us know if you are satisfied by clicking this link:\n{feedback_link}\n\n\
             {SIGN_OFF}"
        ),
    }
}
