use axum::{extract::Extension, Json};

use crate::domains::categories::Category;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Category choices offered by the complaint form
pub async fn list_categories_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = Category::find_all(&state.db_pool).await?;
    Ok(Json(categories))
}
