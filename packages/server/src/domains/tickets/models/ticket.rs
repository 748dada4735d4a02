use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::{CategoryId, CustomerId, StaffUserId, TicketId};

use super::TicketStatus;

/// A customer complaint
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    pub id: TicketId,
    /// Human-facing number, `DISCO-YYYY-NNNNNN`; never changes once assigned
    #[sqlx(rename = "ticket_id")]
    #[serde(rename = "ticket_id")]
    pub ticket_number: String,
    pub customer_id: CustomerId,
    pub category_id: Option<CategoryId>,
    pub description: String,
    pub status: TicketStatus,
    pub current_assigned_to: Option<StaffUserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub satisfaction_rating: Option<i16>,
    pub satisfaction_comment: Option<String>,
}

/// Row values for a freshly submitted complaint
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub ticket_number: String,
    pub customer_id: CustomerId,
    pub category_id: CategoryId,
    pub description: String,
    pub assigned_to: Option<StaffUserId>,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub async fn find_by_ticket_number<'e, E: PgExecutor<'e>>(
        ticket_number: &str,
        executor: E,
    ) -> Result<Option<Self>> {
        let ticket = sqlx::query_as::<_, Self>("SELECT * FROM tickets WHERE ticket_id = $1")
            .bind(ticket_number)
            .fetch_optional(executor)
            .await?;
        Ok(ticket)
    }

    /// Same as `find_by_ticket_number`, holding a row lock until the
    /// surrounding transaction ends.
    pub async fn find_by_ticket_number_for_update<'e, E: PgExecutor<'e>>(
        ticket_number: &str,
        executor: E,
    ) -> Result<Option<Self>> {
        let ticket =
            sqlx::query_as::<_, Self>("SELECT * FROM tickets WHERE ticket_id = $1 FOR UPDATE")
                .bind(ticket_number)
                .fetch_optional(executor)
                .await?;
        Ok(ticket)
    }

    /// Insert a new ticket in status NEW.
    ///
    /// Fails with a unique violation if `ticket_number` is already taken.
    pub async fn insert<'e, E: PgExecutor<'e>>(input: &NewTicket, executor: E) -> Result<Self> {
        let ticket = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO tickets (
                id, ticket_id, customer_id, category_id, description,
                status, current_assigned_to, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(TicketId::new())
        .bind(&input.ticket_number)
        .bind(input.customer_id)
        .bind(input.category_id)
        .bind(&input.description)
        .bind(TicketStatus::New)
        .bind(input.assigned_to)
        .bind(input.created_at)
        .fetch_one(executor)
        .await?;
        Ok(ticket)
    }

    /// Persist a status change together with its `resolved_at`
    pub async fn save_status<'e, E: PgExecutor<'e>>(
        id: TicketId,
        status: TicketStatus,
        resolved_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        executor: E,
    ) -> Result<Self> {
        let ticket = sqlx::query_as::<_, Self>(
            r#"
            UPDATE tickets
            SET status = $2, resolved_at = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(resolved_at)
        .bind(now)
        .fetch_one(executor)
        .await?;
        Ok(ticket)
    }

    /// Reassign to `to_staff` and force status ESCALATED
    pub async fn save_escalation<'e, E: PgExecutor<'e>>(
        id: TicketId,
        to_staff: StaffUserId,
        now: DateTime<Utc>,
        executor: E,
    ) -> Result<Self> {
        let ticket = sqlx::query_as::<_, Self>(
            r#"
            UPDATE tickets
            SET current_assigned_to = $2, status = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(to_staff)
        .bind(TicketStatus::Escalated)
        .bind(now)
        .fetch_one(executor)
        .await?;
        Ok(ticket)
    }

    /// Store the customer's rating. Only matches a ticket that is RESOLVED at
    /// write time; returns `None` otherwise and changes nothing.
    pub async fn save_feedback<'e, E: PgExecutor<'e>>(
        id: TicketId,
        rating: i16,
        comment: Option<&str>,
        executor: E,
    ) -> Result<Option<Self>> {
        let ticket = sqlx::query_as::<_, Self>(
            r#"
            UPDATE tickets
            SET satisfaction_rating = $2, satisfaction_comment = $3, updated_at = NOW()
            WHERE id = $1 AND status = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rating)
        .bind(comment)
        .bind(TicketStatus::Resolved)
        .fetch_optional(executor)
        .await?;
        Ok(ticket)
    }
}
