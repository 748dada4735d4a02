use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::CustomerId;

/// Complainant; identified by email
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub account_number: Option<String>,
    pub meter_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Customer fields as submitted with a complaint (already validated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    /// Lowercased
    pub email: String,
    pub phone: String,
    pub account_number: Option<String>,
    pub meter_number: Option<String>,
}

impl Customer {
    /// Label used in listings: account number when known, else phone
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            self.name,
            self.account_number.as_deref().unwrap_or(&self.phone)
        )
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(id: CustomerId, executor: E) -> Result<Self> {
        let customer = sqlx::query_as::<_, Self>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(customer)
    }

    /// Find the customer by email, creating them if new.
    ///
    /// An existing customer always takes the submitted name and phone; account
    /// and meter numbers are only overwritten when the submission carries one.
    pub async fn upsert_from_complaint<'e, E: PgExecutor<'e>>(
        details: &CustomerDetails,
        executor: E,
    ) -> Result<Self> {
        let customer = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO customers (id, name, email, phone, account_number, meter_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (email)
            DO UPDATE SET
                name = EXCLUDED.name,
                phone = EXCLUDED.phone,
                account_number = COALESCE(EXCLUDED.account_number, customers.account_number),
                meter_number = COALESCE(EXCLUDED.meter_number, customers.meter_number)
            RETURNING *
            "#,
        )
        .bind(CustomerId::new())
        .bind(&details.name)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(&details.account_number)
        .bind(&details.meter_number)
        .fetch_one(executor)
        .await?;
        Ok(customer)
    }
}
