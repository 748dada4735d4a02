//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods and actions directly.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use complaints_core::common::CategoryId;
use complaints_core::domains::accounts::password::hash_password;
use complaints_core::domains::accounts::{CreateUser, User};
use complaints_core::domains::categories::{Category, CreateCategory};
use complaints_core::domains::staff::{CreateStaffUser, StaffUser};
use complaints_core::domains::tickets::actions::{create_complaint, CreatedTicket};
use complaints_core::domains::tickets::forms::ComplaintInput;
use complaints_core::domains::tickets::ComplaintForm;
use complaints_core::kernel::ServerDeps;

pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Create a login identity with `TEST_PASSWORD`
pub async fn create_test_user(
    pool: &PgPool,
    username: &str,
    is_staff: bool,
    is_superuser: bool,
) -> Result<User> {
    let input = CreateUser::builder()
        .username(username)
        .full_name("")
        .password_hash(hash_password(TEST_PASSWORD)?)
        .is_staff(is_staff)
        .is_superuser(is_superuser)
        .build();
    User::create(input, pool).await
}

/// Create an identity plus staff profile holding `role`
pub async fn create_test_staff(
    pool: &PgPool,
    username: &str,
    full_name: &str,
    role: &str,
) -> Result<StaffUser> {
    let input = CreateUser::builder()
        .username(username)
        .full_name(full_name)
        .password_hash(hash_password(TEST_PASSWORD)?)
        .build();
    let user = User::create(input, pool).await?;
    StaffUser::create(
        CreateStaffUser {
            user_id: user.id,
            role: role.to_string(),
            department: None,
            region: Some("Ikeja".to_string()),
        },
        pool,
    )
    .await
}

pub async fn create_test_category(pool: &PgPool, name: &str, role: &str) -> Result<Category> {
    Category::create(
        CreateCategory {
            name: name.to_string(),
            description: None,
            default_first_level_role: role.to_string(),
        },
        pool,
    )
    .await
}

/// A valid complaint form for `category_id`
pub fn complaint_form(category_id: CategoryId, email: &str) -> ComplaintForm {
    ComplaintForm {
        name: Some("Ada Obi".to_string()),
        email: Some(email.to_string()),
        phone: Some("08030000000".to_string()),
        account_number: Some("ACC-1001".to_string()),
        meter_number: None,
        category: Some(category_id.to_string()),
        description: Some("No light on our street for three days".to_string()),
    }
}

pub fn complaint_input(category_id: CategoryId, email: &str) -> ComplaintInput {
    complaint_form(category_id, email)
        .validate()
        .expect("fixture complaint should validate")
}

/// File a complaint through the real action
pub async fn file_complaint(
    deps: &ServerDeps,
    category_id: CategoryId,
    email: &str,
) -> CreatedTicket {
    create_complaint(complaint_input(category_id, email), deps)
        .await
        .expect("complaint should be created")
}

/// Rewrite a ticket's timestamps, for date-window tests
pub async fn backdate_ticket(
    pool: &PgPool,
    ticket_number: &str,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
) -> Result<()> {
    sqlx::query("UPDATE tickets SET created_at = $2, resolved_at = $3 WHERE ticket_id = $1")
        .bind(ticket_number)
        .bind(created_at)
        .bind(resolved_at)
        .execute(pool)
        .await?;
    Ok(())
}

/// Bearer token for `user`
pub fn token_for(deps: &ServerDeps, user: &User) -> String {
    deps.jwt_service
        .create_token(user.id, user.username.clone(), user.is_staff, user.is_superuser)
        .expect("token should be issued")
}

/// Bearer token for the identity behind a staff profile
pub async fn token_for_staff(deps: &ServerDeps, staff: &StaffUser) -> String {
    let user = User::find_by_id(staff.user_id, &deps.db_pool)
        .await
        .expect("user lookup")
        .expect("staff user exists");
    token_for(deps, &user)
}
