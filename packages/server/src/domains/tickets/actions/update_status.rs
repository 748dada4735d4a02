use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::domains::customers::Customer;
use crate::domains::notifications::DeliveryOutcome;
use crate::domains::staff::StaffUser;
use crate::domains::tickets::errors::TicketError;
use crate::domains::tickets::forms::StatusUpdate;
use crate::domains::tickets::lifecycle::{
    history_action_for, resolved_at_after, status_change_comment,
};
use crate::domains::tickets::models::{
    NewHistoryEntry, Ticket, TicketHistory, TicketStatus,
};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize)]
pub struct StatusChanged {
    pub ticket: Ticket,
    pub history: TicketHistory,
    /// Set when the change triggered a resolution email
    #[serde(skip)]
    pub notification: Option<DeliveryOutcome>,
}

/// Move a ticket to `update.status` on behalf of `actor`.
///
/// Any recognised status may follow any other. Moving into RESOLVED emails
/// the customer a feedback link every time, but only the first resolution
/// stamps `resolved_at`.
pub async fn update_status(
    ticket_number: &str,
    actor: &StaffUser,
    update: StatusUpdate,
    deps: &ServerDeps,
) -> Result<StatusChanged, TicketError> {
    let now = Utc::now();
    let mut tx = deps.db_pool.begin().await?;

    let ticket = Ticket::find_by_ticket_number_for_update(ticket_number, &mut *tx)
        .await?
        .ok_or_else(|| TicketError::NotFound(ticket_number.to_string()))?;

    let old_status = ticket.status;
    let new_status = update.status;
    let resolved_at = resolved_at_after(ticket.resolved_at, new_status, now);

    let ticket = Ticket::save_status(ticket.id, new_status, resolved_at, now, &mut *tx).await?;

    let history = TicketHistory::append(
        &NewHistoryEntry {
            ticket_id: ticket.id,
            from_staff_id: Some(actor.id),
            to_staff_id: Some(actor.id),
            action_type: history_action_for(new_status),
            comment: Some(status_change_comment(
                update.comment.as_deref(),
                old_status,
                new_status,
            )),
            created_at: now,
        },
        &mut *tx,
    )
    .await?;

    tx.commit().await?;

    info!(
        ticket = %ticket.ticket_number,
        staff_id = %actor.id,
        from = %old_status,
        to = %new_status,
        "Ticket status changed"
    );

    let notification = if new_status == TicketStatus::Resolved {
        let customer = Customer::find_by_id(ticket.customer_id, &deps.db_pool).await?;
        Some(deps.notifier().notify_resolved(&ticket, &customer).await)
    } else {
        None
    };

    Ok(StatusChanged {
        ticket,
        history,
        notification,
    })
}
