use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;

use crate::common::TicketId;
use crate::domains::tickets::models::TicketStatus;

use super::duration::humanize_seconds;
use super::filter::DashboardFilter;

/// How many still-open tickets the dashboard lists
pub const OPEN_TICKET_LIMIT: i64 = 50;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StatusCount {
    pub status: TicketStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryCount {
    /// `None` for tickets whose category was deleted
    pub category_name: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OpenTicketRow {
    pub id: TicketId,
    pub ticket_id: String,
    pub status: TicketStatus,
    pub customer_name: String,
    pub category_name: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenTicket {
    #[serde(flatten)]
    pub ticket: OpenTicketRow,
    pub age_seconds: i64,
    pub age: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub filters: DashboardFilter,
    pub total_tickets: i64,
    pub status_counts: Vec<StatusCount>,
    pub category_counts: Vec<CategoryCount>,
    /// Mean of `resolved_at - created_at` over filtered tickets that have been resolved
    pub avg_resolution_seconds: Option<f64>,
    pub avg_resolution: Option<String>,
    /// Oldest first
    pub open_tickets: Vec<OpenTicket>,
}

/// Shared WHERE clause; binds $1 status, $2 start date, $3 end date
const FILTERED: &str = r#"
    WHERE ($1::text IS NULL OR t.status = $1)
      AND ($2::date IS NULL OR (t.created_at AT TIME ZONE 'UTC')::date >= $2)
      AND ($3::date IS NULL OR (t.created_at AT TIME ZONE 'UTC')::date <= $3)
"#;

async fn total_tickets(filter: &DashboardFilter, pool: &PgPool) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM tickets t {}", FILTERED);
    let total = sqlx::query_scalar::<_, i64>(&sql)
        .bind(&filter.status)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_one(pool)
        .await?;
    Ok(total)
}

async fn status_counts(filter: &DashboardFilter, pool: &PgPool) -> Result<Vec<StatusCount>> {
    let sql = format!(
        "SELECT t.status, COUNT(*) AS count FROM tickets t {} GROUP BY t.status ORDER BY t.status",
        FILTERED
    );
    let counts = sqlx::query_as::<_, StatusCount>(&sql)
        .bind(&filter.status)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(pool)
        .await?;
    Ok(counts)
}

async fn category_counts(filter: &DashboardFilter, pool: &PgPool) -> Result<Vec<CategoryCount>> {
    let sql = format!(
        r#"
        SELECT cat.name AS category_name, COUNT(*) AS count
        FROM tickets t
        LEFT JOIN categories cat ON cat.id = t.category_id
        {}
        GROUP BY cat.name
        ORDER BY cat.name NULLS LAST
        "#,
        FILTERED
    );
    let counts = sqlx::query_as::<_, CategoryCount>(&sql)
        .bind(&filter.status)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(pool)
        .await?;
    Ok(counts)
}

async fn avg_resolution_seconds(filter: &DashboardFilter, pool: &PgPool) -> Result<Option<f64>> {
    let sql = format!(
        r#"
        SELECT AVG(EXTRACT(EPOCH FROM (t.resolved_at - t.created_at)))::float8
        FROM tickets t
        {}
          AND t.resolved_at IS NOT NULL
        "#,
        FILTERED
    );
    let avg = sqlx::query_scalar::<_, Option<f64>>(&sql)
        .bind(&filter.status)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_one(pool)
        .await?;
    Ok(avg)
}

async fn oldest_open_tickets(filter: &DashboardFilter, pool: &PgPool) -> Result<Vec<OpenTicketRow>> {
    let sql = format!(
        r#"
        SELECT
            t.id,
            t.ticket_id,
            t.status,
            c.name AS customer_name,
            cat.name AS category_name,
            CASE WHEN s.id IS NULL THEN NULL
                 ELSE COALESCE(NULLIF(BTRIM(u.full_name), ''), u.username) || ' - ' || s.role
            END AS assigned_to,
            t.created_at
        FROM tickets t
        JOIN customers c ON c.id = t.customer_id
        LEFT JOIN categories cat ON cat.id = t.category_id
        LEFT JOIN staff_users s ON s.id = t.current_assigned_to
        LEFT JOIN users u ON u.id = s.user_id
        {}
          AND t.status = ANY($4)
        ORDER BY t.created_at ASC, t.id ASC
        LIMIT $5
        "#,
        FILTERED
    );
    let open: Vec<String> = TicketStatus::OPEN.iter().map(|s| s.as_str().to_string()).collect();
    let rows = sqlx::query_as::<_, OpenTicketRow>(&sql)
        .bind(&filter.status)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(open)
        .bind(OPEN_TICKET_LIMIT)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Compute the dashboard for `filter` as of `now`.
pub async fn build_dashboard(
    filter: DashboardFilter,
    now: DateTime<Utc>,
    pool: &PgPool,
) -> Result<DashboardReport> {
    let total_tickets = total_tickets(&filter, pool).await?;
    let status_counts = status_counts(&filter, pool).await?;
    let category_counts = category_counts(&filter, pool).await?;
    let avg_resolution_seconds = avg_resolution_seconds(&filter, pool).await?;
    let open_tickets = oldest_open_tickets(&filter, pool)
        .await?
        .into_iter()
        .map(|ticket| {
            let age_seconds = (now - ticket.created_at).num_seconds().max(0);
            OpenTicket {
                age: humanize_seconds(age_seconds as f64),
                age_seconds,
                ticket,
            }
        })
        .collect();

    debug!(?filter, total_tickets, "Dashboard computed");

    Ok(DashboardReport {
        filters: filter,
        total_tickets,
        status_counts,
        category_counts,
        avg_resolution: avg_resolution_seconds.map(humanize_seconds),
        avg_resolution_seconds,
        open_tickets,
    })
}
