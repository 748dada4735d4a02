use axum::{
    extract::Extension,
    response::{IntoResponse, Redirect},
    Form, Json,
};

use crate::domains::accounts::actions::{login, LoginForm, LoginToken};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::RequireUser;

pub const DASHBOARD_PATH: &str = "/staff/dashboard/";
pub const STAFF_TICKETS_PATH: &str = "/staff/tickets/";

/// Username/password login; returns a bearer token
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginToken>, ApiError> {
    let credentials = form.validate()?;
    let token = login(&credentials, &state.deps).await?;
    Ok(Json(token))
}

/// Where to go after signing in: the dashboard for staff and superusers,
/// the personal ticket list otherwise
pub async fn post_login_handler(RequireUser(user): RequireUser) -> impl IntoResponse {
    if user.is_staff || user.is_superuser {
        Redirect::to(DASHBOARD_PATH)
    } else {
        Redirect::to(STAFF_TICKETS_PATH)
    }
}
