use axum::{
    extract::{Extension, Query},
    Json,
};
use chrono::Utc;

use crate::common::{Actor, Capability};
use crate::domains::accounts::models::User;
use crate::domains::reporting::{build_dashboard, DashboardQuery, DashboardReport};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::RequireUser;

/// Leadership dashboard; staff and superusers only
pub async fn dashboard_handler(
    Extension(state): Extension<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardReport>, ApiError> {
    // Flags come from the database, not the token, so revocations apply at once
    let current = User::find_by_id(user.user_id, &state.db_pool)
        .await?
        .filter(|u| u.is_active)
        .ok_or(ApiError::Forbidden)?;
    Actor::new(current.id, current.is_staff, current.is_superuser)
        .can(Capability::ViewDashboard)
        .check()?;
    let filter = query.validate()?;
    let report = build_dashboard(filter, Utc::now(), &state.db_pool).await?;
    Ok(Json(report))
}
