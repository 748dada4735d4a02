use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{StaffUserId, UserId};

/// Staff profile; exactly one per login identity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StaffUser {
    pub id: StaffUserId,
    pub user_id: UserId,
    pub role: String,
    pub department: Option<String>,
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Staff profile joined with the identity's names, for display and notifications
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StaffMember {
    pub id: StaffUserId,
    pub user_id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
    pub region: Option<String>,
}

/// Input for creating a staff profile
#[derive(Debug, Clone)]
pub struct CreateStaffUser {
    pub user_id: UserId,
    pub role: String,
    pub department: Option<String>,
    pub region: Option<String>,
}

const STAFF_MEMBER_SELECT: &str = r#"
    SELECT s.id, s.user_id, u.username, u.full_name, s.role, s.department, s.region
    FROM staff_users s
    JOIN users u ON u.id = s.user_id
"#;

impl StaffMember {
    /// Full name, or the username when no full name is recorded
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// "Full Name - Role", as shown in escalation pickers
    pub fn label(&self) -> String {
        format!("{} - {}", self.display_name(), self.role)
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        id: StaffUserId,
        executor: E,
    ) -> Result<Option<Self>> {
        let member = sqlx::query_as::<_, Self>(&format!("{} WHERE s.id = $1", STAFF_MEMBER_SELECT))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(member)
    }

    /// Every staff member, ordered by name (escalation targets)
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let members = sqlx::query_as::<_, Self>(&format!(
            "{} ORDER BY u.full_name ASC, u.username ASC",
            STAFF_MEMBER_SELECT
        ))
        .fetch_all(pool)
        .await?;
        Ok(members)
    }
}

impl StaffUser {
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        id: StaffUserId,
        executor: E,
    ) -> Result<Option<Self>> {
        let staff = sqlx::query_as::<_, Self>("SELECT * FROM staff_users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(staff)
    }

    /// Staff profile attached to a login identity
    pub async fn find_by_user_id(user_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let staff = sqlx::query_as::<_, Self>("SELECT * FROM staff_users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(staff)
    }

    /// First staff member (oldest profile) holding `role`, if any.
    ///
    /// Used to pick the initial assignee for a new ticket.
    pub async fn find_first_by_role<'e, E: PgExecutor<'e>>(
        role: &str,
        executor: E,
    ) -> Result<Option<Self>> {
        let staff = sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM staff_users
            WHERE role = $1
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(role)
        .fetch_optional(executor)
        .await?;
        Ok(staff)
    }

    pub async fn create(input: CreateStaffUser, pool: &PgPool) -> Result<Self> {
        let staff = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO staff_users (id, user_id, role, department, region)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(StaffUserId::new())
        .bind(input.user_id)
        .bind(&input.role)
        .bind(&input.department)
        .bind(&input.region)
        .fetch_one(pool)
        .await?;
        Ok(staff)
    }

    /// Delete a staff profile; tickets and history keep existing with the link nulled
    pub async fn delete(id: StaffUserId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM staff_users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
