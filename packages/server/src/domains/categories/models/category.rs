use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::CategoryId;

/// Complaint category
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    /// Staff role that receives new tickets, e.g. "Billing Officer"
    pub default_first_level_role: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new category
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub default_first_level_role: String,
}

impl Category {
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        id: CategoryId,
        executor: E,
    ) -> Result<Option<Self>> {
        let category = sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(category)
    }

    /// All categories, alphabetical (the complaint form's choices)
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let categories =
            sqlx::query_as::<_, Self>("SELECT * FROM categories ORDER BY name ASC, created_at ASC")
                .fetch_all(pool)
                .await?;
        Ok(categories)
    }

    pub async fn create(input: CreateCategory, pool: &PgPool) -> Result<Self> {
        let category = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO categories (id, name, description, default_first_level_role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(CategoryId::new())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.default_first_level_role)
        .fetch_one(pool)
        .await?;
        Ok(category)
    }

    /// Delete a category; its tickets keep existing with no category
    pub async fn delete(id: CategoryId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
