use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use typed_builder::TypedBuilder;

use crate::common::UserId;

/// Login identity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user (password already hashed)
#[derive(Debug, Clone, TypedBuilder)]
pub struct CreateUser {
    #[builder(setter(into))]
    pub username: String,
    #[builder(setter(into), default)]
    pub full_name: String,
    #[builder(default, setter(strip_option, into))]
    pub email: Option<String>,
    #[builder(setter(into))]
    pub password_hash: String,
    #[builder(default)]
    pub is_staff: bool,
    #[builder(default)]
    pub is_superuser: bool,
}

impl User {
    /// Name to show customers; falls back to the username when no full name is set
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn create(input: CreateUser, pool: &PgPool) -> Result<Self> {
        let user = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, username, full_name, email, password_hash, is_staff, is_superuser)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(&input.username)
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.is_staff)
        .bind(input.is_superuser)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    pub async fn delete(id: UserId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
