use thiserror::Error;

use crate::common::FieldErrors;

/// Failures of ticket actions that callers are expected to handle
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("Ticket not found: {0}")]
    NotFound(String),

    #[error("Staff member not found")]
    StaffNotFound,

    #[error("No staff profile for this account")]
    NoStaffProfile,

    #[error("Invalid input: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for TicketError {
    fn from(err: sqlx::Error) -> Self {
        TicketError::Internal(err.into())
    }
}
