use axum::{
    extract::{Extension, Path},
    Form, Json,
};
use serde::Serialize;

use crate::domains::tickets::actions::{feedback_eligibility, record_feedback, FeedbackOutcome};
use crate::domains::tickets::data::FeedbackEligibility;
use crate::domains::tickets::{FeedbackForm, TicketStatus};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FeedbackResponse {
    Recorded {
        ticket_id: String,
        satisfaction_rating: Option<i16>,
        satisfaction_comment: Option<String>,
    },
    NotAllowed {
        ticket_id: String,
        status: TicketStatus,
    },
}

pub async fn feedback_form_handler(
    Extension(state): Extension<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Json<FeedbackEligibility>, ApiError> {
    let eligibility = feedback_eligibility(&ticket_id, &state.deps).await?;
    Ok(Json(eligibility))
}

/// Customer satisfaction rating. A ticket that is not RESOLVED answers
/// `not_allowed` with 200; the rating itself is only validated for
/// resolved tickets.
pub async fn submit_feedback_handler(
    Extension(state): Extension<AppState>,
    Path(ticket_id): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let eligibility = feedback_eligibility(&ticket_id, &state.deps).await?;
    if !eligibility.can_give_feedback {
        return Ok(Json(FeedbackResponse::NotAllowed {
            ticket_id: eligibility.ticket_id,
            status: eligibility.status,
        }));
    }

    let feedback = form.validate()?;
    let response = match record_feedback(&ticket_id, feedback, &state.deps).await? {
        FeedbackOutcome::Recorded(ticket) => FeedbackResponse::Recorded {
            ticket_id: ticket.ticket_number,
            satisfaction_rating: ticket.satisfaction_rating,
            satisfaction_comment: ticket.satisfaction_comment,
        },
        FeedbackOutcome::NotAllowed(ticket) => FeedbackResponse::NotAllowed {
            ticket_id: ticket.ticket_number,
            status: ticket.status,
        },
    };
    Ok(Json(response))
}
