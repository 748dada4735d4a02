//! Inbound ticket forms and their validation.
//!
//! Field names and limits match the public complaint form; messages are the
//! ones shown next to each field.

use serde::Deserialize;

use crate::common::validation::{
    clean_optional, is_valid_email, optional_text, required_text, FieldErrors,
};
use crate::common::{CategoryId, StaffUserId, Validated};
use crate::domains::customers::CustomerDetails;

use super::models::TicketStatus;

pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

// =============================================================================
// Complaint
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub account_number: Option<String>,
    pub meter_number: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// A complaint that passed field validation. The category still has to
/// exist; that is checked when the ticket is created.
#[derive(Debug, Clone)]
pub struct ComplaintInput {
    pub customer: CustomerDetails,
    pub category_id: CategoryId,
    pub description: String,
}

impl ComplaintForm {
    pub fn validate(&self) -> Validated<ComplaintInput> {
        let mut errors = FieldErrors::new();

        let name = required_text(&mut errors, "name", self.name.as_deref(), Some(150));
        let email = required_text(&mut errors, "email", self.email.as_deref(), Some(254));
        if !email.is_empty() && !is_valid_email(&email) {
            errors.add("email", "Enter a valid email address.");
        }
        let phone = required_text(&mut errors, "phone", self.phone.as_deref(), Some(20));
        let account_number = optional_text(
            &mut errors,
            "account_number",
            self.account_number.as_deref(),
            Some(50),
        );
        let meter_number = optional_text(
            &mut errors,
            "meter_number",
            self.meter_number.as_deref(),
            Some(50),
        );

        let category_id = match clean_optional(self.category.as_deref()) {
            None => {
                errors.add("category", "This field is required.");
                None
            }
            Some(raw) => match CategoryId::parse(&raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("category", INVALID_CHOICE);
                    None
                }
            },
        };

        // Description keeps its inner formatting; only outer whitespace goes
        let description =
            required_text(&mut errors, "description", self.description.as_deref(), None);

        match category_id {
            Some(category_id) if errors.is_empty() => Ok(ComplaintInput {
                customer: CustomerDetails {
                    name,
                    email: email.to_lowercase(),
                    phone,
                    account_number,
                    meter_number,
                },
                category_id,
                description,
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Staff actions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: TicketStatus,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    pub to_staff: StaffUserId,
    pub comment: Option<String>,
}

/// What a staff member asked to do with a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketAction {
    UpdateStatus(StatusUpdate),
    Escalate(Escalation),
}

/// POST body of the staff ticket page.
///
/// `action` names the operation. Older clients send a bare `update_status`
/// or `escalate` field (the submit button's name) instead; either form works.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketActionForm {
    pub action: Option<String>,
    pub update_status: Option<String>,
    pub escalate: Option<String>,
    pub status: Option<String>,
    pub to_staff: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionKind {
    UpdateStatus,
    Escalate,
}

impl TicketActionForm {
    fn kind(&self) -> Option<ActionKind> {
        match self.action.as_deref().map(str::trim) {
            Some("update_status") => return Some(ActionKind::UpdateStatus),
            Some("escalate") => return Some(ActionKind::Escalate),
            _ => {}
        }
        if self.update_status.is_some() {
            Some(ActionKind::UpdateStatus)
        } else if self.escalate.is_some() {
            Some(ActionKind::Escalate)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Validated<TicketAction> {
        match self.kind() {
            Some(ActionKind::UpdateStatus) => {
                validate_status_update(self.status.as_deref(), self.comment.as_deref())
                    .map(TicketAction::UpdateStatus)
            }
            Some(ActionKind::Escalate) => {
                validate_escalation(self.to_staff.as_deref(), self.comment.as_deref())
                    .map(TicketAction::Escalate)
            }
            None => Err(FieldErrors::single(
                "action",
                "Choose an action: update_status or escalate.",
            )),
        }
    }
}

pub fn validate_status_update(status: Option<&str>, comment: Option<&str>) -> Validated<StatusUpdate> {
    let status = match clean_optional(status) {
        None => Err(FieldErrors::single("status", "This field is required.")),
        Some(raw) => raw.parse::<TicketStatus>().map_err(|_| {
            FieldErrors::single(
                "status",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    raw
                ),
            )
        }),
    }?;
    Ok(StatusUpdate {
        status,
        comment: clean_optional(comment),
    })
}

pub fn validate_escalation(to_staff: Option<&str>, comment: Option<&str>) -> Validated<Escalation> {
    let to_staff = match clean_optional(to_staff) {
        None => Err(FieldErrors::single("to_staff", "This field is required.")),
        Some(raw) => {
            StaffUserId::parse(&raw).map_err(|_| FieldErrors::single("to_staff", INVALID_CHOICE))
        }
    }?;
    Ok(Escalation {
        to_staff,
        comment: clean_optional(comment),
    })
}

// =============================================================================
// Feedback
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackForm {
    pub rating: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// 1 (very dissatisfied) to 5 (very satisfied)
    pub rating: i16,
    pub comment: Option<String>,
}

impl FeedbackForm {
    pub fn validate(&self) -> Validated<Feedback> {
        let rating = match clean_optional(self.rating.as_deref()) {
            None => Err(FieldErrors::single("rating", "This field is required.")),
            Some(raw) => match raw.parse::<i16>() {
                Ok(r) if (1..=5).contains(&r) => Ok(r),
                _ => Err(FieldErrors::single(
                    "rating",
                    format!(
                        "Select a valid choice. {} is not one of the available choices.",
                        raw
                    ),
                )),
            },
        }?;
        Ok(Feedback {
            rating,
            comment: clean_optional(self.comment.as_deref()),
        })
    }
}
