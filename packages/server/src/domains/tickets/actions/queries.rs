use tracing::debug;

use crate::common::UserId;
use crate::domains::categories::Category;
use crate::domains::customers::Customer;
use crate::domains::staff::{StaffMember, StaffUser};
use crate::domains::tickets::data::{FeedbackEligibility, TicketDetail, TicketSummary};
use crate::domains::tickets::errors::TicketError;
use crate::domains::tickets::lifecycle::accepts_feedback;
use crate::domains::tickets::models::{HistoryEntry, Ticket};
use crate::kernel::ServerDeps;

/// Staff profile of a signed-in identity
pub async fn staff_profile_for(user_id: UserId, deps: &ServerDeps) -> Result<StaffUser, TicketError> {
    StaffUser::find_by_user_id(user_id, &deps.db_pool)
        .await?
        .ok_or(TicketError::NoStaffProfile)
}

/// Ticket by its public number, or `NotFound`
pub async fn find_ticket(ticket_number: &str, deps: &ServerDeps) -> Result<Ticket, TicketError> {
    Ticket::find_by_ticket_number(ticket_number, &deps.db_pool)
        .await?
        .ok_or_else(|| TicketError::NotFound(ticket_number.to_string()))
}

pub async fn assigned_tickets(
    staff: &StaffUser,
    deps: &ServerDeps,
) -> Result<Vec<TicketSummary>, TicketError> {
    let tickets = TicketSummary::find_assigned_to(staff.id, &deps.db_pool).await?;
    debug!(staff_id = %staff.id, count = tickets.len(), "Loaded assigned tickets");
    Ok(tickets)
}

pub async fn ticket_detail(ticket_number: &str, deps: &ServerDeps) -> Result<TicketDetail, TicketError> {
    let pool = &deps.db_pool;
    let ticket = find_ticket(ticket_number, deps).await?;

    let customer = Customer::find_by_id(ticket.customer_id, pool).await?;
    let category_name = match ticket.category_id {
        Some(id) => Category::find_by_id(id, pool).await?.map(|c| c.name),
        None => None,
    };
    let assigned_to = match ticket.current_assigned_to {
        Some(id) => StaffMember::find_by_id(id, pool).await?,
        None => None,
    };
    let history = HistoryEntry::find_for_ticket(ticket.id, pool).await?;
    let staff = StaffMember::find_all(pool).await?;

    Ok(TicketDetail {
        ticket,
        customer,
        category_name,
        assigned_to,
        history,
        staff,
    })
}

pub async fn feedback_eligibility(
    ticket_number: &str,
    deps: &ServerDeps,
) -> Result<FeedbackEligibility, TicketError> {
    let ticket = find_ticket(ticket_number, deps).await?;

    Ok(FeedbackEligibility {
        can_give_feedback: accepts_feedback(ticket.status),
        ticket_id: ticket.ticket_number,
        status: ticket.status,
        satisfaction_rating: ticket.satisfaction_rating,
        satisfaction_comment: ticket.satisfaction_comment,
    })
}
