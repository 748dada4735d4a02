use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{StaffUserId, TicketHistoryId, TicketId};

use super::HistoryAction;

/// One append-only audit-trail entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketHistory {
    pub id: TicketHistoryId,
    pub ticket_id: TicketId,
    pub from_staff_id: Option<StaffUserId>,
    pub to_staff_id: Option<StaffUserId>,
    pub action_type: HistoryAction,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub ticket_id: TicketId,
    pub from_staff_id: Option<StaffUserId>,
    pub to_staff_id: Option<StaffUserId>,
    pub action_type: HistoryAction,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// History entry with staff names resolved, for the ticket detail page
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryEntry {
    pub id: TicketHistoryId,
    pub action_type: HistoryAction,
    pub from_staff: Option<String>,
    pub to_staff: Option<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TicketHistory {
    pub async fn append<'e, E: PgExecutor<'e>>(entry: &NewHistoryEntry, executor: E) -> Result<Self> {
        let history = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO ticket_history (
                id, ticket_id, from_staff_id, to_staff_id, action_type, comment, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(TicketHistoryId::new())
        .bind(entry.ticket_id)
        .bind(entry.from_staff_id)
        .bind(entry.to_staff_id)
        .bind(entry.action_type)
        .bind(&entry.comment)
        .bind(entry.created_at)
        .fetch_one(executor)
        .await?;
        Ok(history)
    }

    /// Raw entries for a ticket, oldest first
    pub async fn find_for_ticket(ticket_id: TicketId, pool: &PgPool) -> Result<Vec<Self>> {
        let entries = sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM ticket_history
            WHERE ticket_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }

    pub async fn count_for_ticket(ticket_id: TicketId, pool: &PgPool) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ticket_history WHERE ticket_id = $1")
                .bind(ticket_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}

impl HistoryEntry {
    /// Display entries for a ticket, newest first, labelled "Name - Role"
    pub async fn find_for_ticket(ticket_id: TicketId, pool: &PgPool) -> Result<Vec<Self>> {
        let entries = sqlx::query_as::<_, Self>(
            r#"
            SELECT
                h.id,
                h.action_type,
                CASE WHEN fs.id IS NULL THEN NULL
                     ELSE COALESCE(NULLIF(BTRIM(fu.full_name), ''), fu.username) || ' - ' || fs.role
                END AS from_staff,
                CASE WHEN ts.id IS NULL THEN NULL
                     ELSE COALESCE(NULLIF(BTRIM(tu.full_name), ''), tu.username) || ' - ' || ts.role
                END AS to_staff,
                h.comment,
                h.created_at
            FROM ticket_history h
            LEFT JOIN staff_users fs ON fs.id = h.from_staff_id
            LEFT JOIN users fu ON fu.id = fs.user_id
            LEFT JOIN staff_users ts ON ts.id = h.to_staff_id
            LEFT JOIN users tu ON tu.id = ts.user_id
            WHERE h.ticket_id = $1
            ORDER BY h.created_at DESC, h.id DESC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }
}
