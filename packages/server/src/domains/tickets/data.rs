//! Read views over tickets for the staff pages.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{StaffUserId, TicketId};
use crate::domains::customers::Customer;
use crate::domains::staff::StaffMember;

use super::models::{HistoryEntry, Ticket, TicketStatus};

/// One row of a staff member's ticket list
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TicketSummary {
    pub id: TicketId,
    pub ticket_id: String,
    pub status: TicketStatus,
    pub customer_name: String,
    pub category_name: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketSummary {
    /// Tickets currently assigned to `staff_id`, newest first
    pub async fn find_assigned_to(staff_id: StaffUserId, pool: &PgPool) -> Result<Vec<Self>> {
        let tickets = sqlx::query_as::<_, Self>(
            r#"
            SELECT
                t.id,
                t.ticket_id,
                t.status,
                c.name AS customer_name,
                cat.name AS category_name,
                t.description,
                t.created_at,
                t.updated_at
            FROM tickets t
            JOIN customers c ON c.id = t.customer_id
            LEFT JOIN categories cat ON cat.id = t.category_id
            WHERE t.current_assigned_to = $1
            ORDER BY t.created_at DESC, t.id DESC
            "#,
        )
        .bind(staff_id)
        .fetch_all(pool)
        .await?;
        Ok(tickets)
    }
}

/// Everything the staff ticket page shows
#[derive(Debug, Clone, Serialize)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub customer: Customer,
    pub category_name: Option<String>,
    pub assigned_to: Option<StaffMember>,
    /// Newest first
    pub history: Vec<HistoryEntry>,
    /// Escalation targets
    pub staff: Vec<StaffMember>,
}

/// What the feedback page needs to know before showing the form
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEligibility {
    pub ticket_id: String,
    pub status: TicketStatus,
    pub can_give_feedback: bool,
    pub satisfaction_rating: Option<i16>,
    pub satisfaction_comment: Option<String>,
}
