use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::common::{FieldErrors, StaffUserId};
use crate::domains::categories::Category;
use crate::domains::customers::Customer;
use crate::domains::notifications::DeliveryOutcome;
use crate::domains::staff::StaffUser;
use crate::domains::tickets::errors::TicketError;
use crate::domains::tickets::forms::{ComplaintInput, INVALID_CHOICE};
use crate::domains::tickets::lifecycle::AUTO_ASSIGNED_COMMENT;
use crate::domains::tickets::models::{
    HistoryAction, NewHistoryEntry, NewTicket, Ticket, TicketHistory,
};
use crate::domains::tickets::ticket_number::next_ticket_number;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize)]
pub struct CreatedTicket {
    pub ticket: Ticket,
    pub customer: Customer,
    pub category_name: String,
    pub assigned_to: Option<StaffUserId>,
    #[serde(skip)]
    pub notification: DeliveryOutcome,
}

/// File a complaint.
///
/// Creates or refreshes the customer, numbers the ticket, assigns it to the
/// first staff member holding the category's first-level role (if any) and
/// records the assignment, all in one transaction. The acknowledgement email
/// goes out after commit.
pub async fn create_complaint(
    input: ComplaintInput,
    deps: &ServerDeps,
) -> Result<CreatedTicket, TicketError> {
    let now = Utc::now();
    let mut tx = deps.db_pool.begin().await?;

    let category = Category::find_by_id(input.category_id, &mut *tx)
        .await?
        .ok_or_else(|| FieldErrors::single("category", INVALID_CHOICE))?;

    let customer = Customer::upsert_from_complaint(&input.customer, &mut *tx).await?;

    let assignee =
        StaffUser::find_first_by_role(&category.default_first_level_role, &mut *tx).await?;
    if assignee.is_none() {
        debug!(
            role = %category.default_first_level_role,
            "No staff member holds the first-level role; ticket left unassigned"
        );
    }
    let assigned_to = assignee.map(|staff| staff.id);

    let ticket_number = next_ticket_number(now.year(), &mut *tx).await?;

    let ticket = Ticket::insert(
        &NewTicket {
            ticket_number,
            customer_id: customer.id,
            category_id: category.id,
            description: input.description,
            assigned_to,
            created_at: now,
        },
        &mut *tx,
    )
    .await?;

    TicketHistory::append(
        &NewHistoryEntry {
            ticket_id: ticket.id,
            from_staff_id: None,
            to_staff_id: assigned_to,
            action_type: HistoryAction::Assigned,
            comment: Some(AUTO_ASSIGNED_COMMENT.to_string()),
            created_at: now,
        },
        &mut *tx,
    )
    .await?;

    tx.commit().await?;

    info!(
        ticket = %ticket.ticket_number,
        customer_id = %customer.id,
        category = %category.name,
        assigned_to = ?assigned_to,
        "Complaint filed"
    );

    let notification = deps
        .notifier()
        .acknowledge_created(&ticket, &customer, &category.name)
        .await;

    Ok(CreatedTicket {
        ticket,
        customer,
        category_name: category.name,
        assigned_to,
        notification,
    })
}
