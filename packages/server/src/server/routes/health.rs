use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;

use crate::server::app::AppState;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    /// Latest applied schema migration, if the schema is in place
    pub schema_version: Option<i64>,
    /// Open tickets, proving the ticket tables answer queries
    pub open_tickets: Option<i64>,
    pub pool_size: u32,
    pub pool_idle: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn check_store(pool: &PgPool) -> anyhow::Result<(Option<i64>, i64)> {
    let schema_version = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool)
    .await?;
    let open_tickets = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM tickets WHERE status IN ('NEW', 'IN_PROGRESS', 'ESCALATED')",
    )
    .fetch_one(pool)
    .await?;
    Ok((schema_version, open_tickets))
}

/// Liveness plus schema check; 503 when the ticket store is unreachable.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthReport>) {
    let pool = &state.db_pool;
    let outcome = match tokio::time::timeout(CHECK_TIMEOUT, check_store(pool)).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!("database check timed out")),
    };

    let report = match outcome {
        Ok((schema_version, open_tickets)) => HealthReport {
            healthy: true,
            schema_version,
            open_tickets: Some(open_tickets),
            pool_size: pool.size(),
            pool_idle: pool.num_idle(),
            error: None,
        },
        Err(e) => {
            warn!(error = %e, "Health check failed");
            HealthReport {
                healthy: false,
                schema_version: None,
                open_tickets: None,
                pool_size: pool.size(),
                pool_idle: pool.num_idle(),
                error: Some(e.to_string()),
            }
        }
    };

    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
