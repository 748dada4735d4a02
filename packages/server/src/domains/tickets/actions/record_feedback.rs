use tracing::{debug, info};

use crate::domains::tickets::errors::TicketError;
use crate::domains::tickets::forms::Feedback;
use crate::domains::tickets::lifecycle::accepts_feedback;
use crate::domains::tickets::models::Ticket;
use crate::kernel::ServerDeps;

/// Result of a feedback submission. Refusal is an ordinary outcome.
#[derive(Debug, Clone)]
pub enum FeedbackOutcome {
    Recorded(Ticket),
    /// The ticket is not RESOLVED; nothing was written
    NotAllowed(Ticket),
}

/// Store the customer's satisfaction rating; a later submission overwrites.
pub async fn record_feedback(
    ticket_number: &str,
    feedback: Feedback,
    deps: &ServerDeps,
) -> Result<FeedbackOutcome, TicketError> {
    let ticket = Ticket::find_by_ticket_number(ticket_number, &deps.db_pool)
        .await?
        .ok_or_else(|| TicketError::NotFound(ticket_number.to_string()))?;

    if !accepts_feedback(ticket.status) {
        debug!(ticket = %ticket_number, status = %ticket.status, "Feedback refused");
        return Ok(FeedbackOutcome::NotAllowed(ticket));
    }

    // The status can change between the read and the write; the update only
    // matches a ticket that is still RESOLVED.
    match Ticket::save_feedback(
        ticket.id,
        feedback.rating,
        feedback.comment.as_deref(),
        &deps.db_pool,
    )
    .await?
    {
        Some(updated) => {
            info!(ticket = %ticket_number, rating = feedback.rating, "Feedback recorded");
            Ok(FeedbackOutcome::Recorded(updated))
        }
        None => Ok(FeedbackOutcome::NotAllowed(ticket)),
    }
}
