//! HTTP error mapping.
//!
//! Handlers return `Result<_, ApiError>`; domain errors convert into it with
//! `?` and render as JSON with the matching status code.

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::common::{AuthError, FieldErrors};
use crate::domains::tickets::TicketError;

pub const LOGIN_PATH: &str = "/accounts/login/";

#[derive(Debug)]
pub enum ApiError {
    /// 422 with field-level messages
    Validation(FieldErrors),
    /// 404
    NotFound,
    /// 403
    Forbidden,
    /// 401, e.g. bad credentials on the login endpoint
    Unauthorized(String),
    /// 303 to the login page, remembering where the user was going
    LoginRequired { next: String },
    /// 500; the cause is logged, never returned
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn login_redirect_target(next: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("next", next)
            .finish();
        format!("{}?{}", LOGIN_PATH, query)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
            }
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "not authorized" })),
            )
                .into_response(),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
            }
            ApiError::LoginRequired { next } => (
                StatusCode::SEE_OTHER,
                [(LOCATION, ApiError::login_redirect_target(&next))],
            )
                .into_response(),
            ApiError::Internal(e) => {
                error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl From<TicketError> for ApiError {
    fn from(e: TicketError) -> Self {
        match e {
            TicketError::NotFound(_) | TicketError::StaffNotFound | TicketError::NoStaffProfile => {
                ApiError::NotFound
            }
            TicketError::Validation(errors) => ApiError::Validation(errors),
            TicketError::Internal(e) => ApiError::Internal(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::AuthenticationRequired => {
                ApiError::Unauthorized("Authentication required".to_string())
            }
            AuthError::InvalidToken => ApiError::Unauthorized("Invalid or expired token".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            AuthError::PermissionDenied(_) => ApiError::Forbidden,
            AuthError::DatabaseError(e) => ApiError::Internal(e.into()),
            AuthError::InternalError(e) => ApiError::Internal(e),
        }
    }
}
