use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::domains::customers::Customer;
use crate::domains::notifications::DeliveryOutcome;
use crate::domains::staff::{StaffMember, StaffUser};
use crate::domains::tickets::errors::TicketError;
use crate::domains::tickets::forms::Escalation;
use crate::domains::tickets::models::{HistoryAction, NewHistoryEntry, Ticket, TicketHistory};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize)]
pub struct Escalated {
    pub ticket: Ticket,
    pub to_staff: StaffMember,
    pub history: TicketHistory,
    #[serde(skip)]
    pub notification: DeliveryOutcome,
}

/// Hand a ticket to another staff member.
///
/// Status becomes ESCALATED whatever it was before, including RESOLVED or
/// CLOSED.
pub async fn escalate(
    ticket_number: &str,
    actor: &StaffUser,
    escalation: Escalation,
    deps: &ServerDeps,
) -> Result<Escalated, TicketError> {
    let now = Utc::now();
    let mut tx = deps.db_pool.begin().await?;

    let ticket = Ticket::find_by_ticket_number_for_update(ticket_number, &mut *tx)
        .await?
        .ok_or_else(|| TicketError::NotFound(ticket_number.to_string()))?;

    let to_staff = StaffMember::find_by_id(escalation.to_staff, &mut *tx)
        .await?
        .ok_or(TicketError::StaffNotFound)?;

    let ticket = Ticket::save_escalation(ticket.id, to_staff.id, now, &mut *tx).await?;

    let history = TicketHistory::append(
        &NewHistoryEntry {
            ticket_id: ticket.id,
            from_staff_id: Some(actor.id),
            to_staff_id: Some(to_staff.id),
            action_type: HistoryAction::Escalated,
            comment: escalation.comment,
            created_at: now,
        },
        &mut *tx,
    )
    .await?;

    tx.commit().await?;

    info!(
        ticket = %ticket.ticket_number,
        from_staff = %actor.id,
        to_staff = %to_staff.id,
        "Ticket escalated"
    );

    let customer = Customer::find_by_id(ticket.customer_id, &deps.db_pool).await?;
    let notification = deps
        .notifier()
        .notify_escalated(&ticket, &customer, &to_staff)
        .await;

    Ok(Escalated {
        ticket,
        to_staff,
        history,
        notification,
    })
}
