use axum::{extract::Extension, http::StatusCode, Form, Json};
use serde::Serialize;

use crate::common::StaffUserId;
use crate::domains::tickets::actions::create_complaint;
use crate::domains::tickets::{ComplaintForm, TicketStatus};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ComplaintReceived {
    pub ticket_id: String,
    pub status: TicketStatus,
    pub category: String,
    pub customer_name: String,
    pub customer_email: String,
    pub assigned_to: Option<StaffUserId>,
    pub message: String,
}

/// Public complaint submission
pub async fn create_complaint_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<ComplaintForm>,
) -> Result<(StatusCode, Json<ComplaintReceived>), ApiError> {
    let input = form.validate()?;
    let created = create_complaint(input, &state.deps).await?;

    Ok((
        StatusCode::CREATED,
        Json(ComplaintReceived {
            message: format!(
                "Your complaint has been received. Your ticket ID is {}.",
                created.ticket.ticket_number
            ),
            ticket_id: created.ticket.ticket_number,
            status: created.ticket.status,
            category: created.category_name,
            customer_name: created.customer.name,
            customer_email: created.customer.email,
            assigned_to: created.assigned_to,
        }),
    ))
}
