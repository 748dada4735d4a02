use axum::{
    extract::{Extension, Path},
    Form, Json,
};
use serde::Serialize;

use crate::common::Capability;
use crate::domains::tickets::actions::{
    assigned_tickets, escalate, find_ticket, staff_profile_for, ticket_detail, update_status,
};
use crate::domains::tickets::data::{TicketDetail, TicketSummary};
use crate::domains::tickets::{Ticket, TicketAction, TicketActionForm};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::RequireUser;

#[derive(Debug, Serialize)]
pub struct TicketActionResponse {
    pub message: String,
    pub ticket: Ticket,
}

/// Tickets assigned to the signed-in staff member, newest first
pub async fn staff_ticket_list_handler(
    Extension(state): Extension<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<TicketSummary>>, ApiError> {
    user.actor().can(Capability::WorkTickets).check()?;
    let staff = staff_profile_for(user.user_id, &state.deps).await?;
    let tickets = assigned_tickets(&staff, &state.deps).await?;
    Ok(Json(tickets))
}

/// Ticket with its history (newest first) and the escalation targets.
///
/// Any staff member may open any ticket.
pub async fn staff_ticket_detail_handler(
    Extension(state): Extension<AppState>,
    RequireUser(user): RequireUser,
    Path(ticket_id): Path<String>,
) -> Result<Json<TicketDetail>, ApiError> {
    user.actor().can(Capability::WorkTickets).check()?;
    staff_profile_for(user.user_id, &state.deps).await?;
    let detail = ticket_detail(&ticket_id, &state.deps).await?;
    Ok(Json(detail))
}

/// Status update or escalation, chosen by the form's `action`
pub async fn staff_ticket_action_handler(
    Extension(state): Extension<AppState>,
    RequireUser(user): RequireUser,
    Path(ticket_id): Path<String>,
    Form(form): Form<TicketActionForm>,
) -> Result<Json<TicketActionResponse>, ApiError> {
    user.actor().can(Capability::WorkTickets).check()?;
    let staff = staff_profile_for(user.user_id, &state.deps).await?;
    // Unknown tickets are 404 whatever the form says
    find_ticket(&ticket_id, &state.deps).await?;

    let response = match form.validate()? {
        TicketAction::UpdateStatus(update) => {
            let changed = update_status(&ticket_id, &staff, update, &state.deps).await?;
            TicketActionResponse {
                message: "Ticket status updated successfully.".to_string(),
                ticket: changed.ticket,
            }
        }
        TicketAction::Escalate(escalation) => {
            let escalated = escalate(&ticket_id, &staff, escalation, &state.deps).await?;
            TicketActionResponse {
                message: format!("Ticket escalated to {}.", escalated.to_staff.label()),
                ticket: escalated.ticket,
            }
        }
    };

    Ok(Json(response))
}
