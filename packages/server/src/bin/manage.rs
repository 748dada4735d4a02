//! Administration CLI for the complaints portal
//!
//! Provisions login identities, staff profiles and complaint categories.
//! Every command prints one JSON object on stdout.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use complaints_core::config::Config;
use complaints_core::domains::accounts::password::hash_password;
use complaints_core::domains::accounts::{CreateUser, User};
use complaints_core::domains::categories::{Category, CreateCategory};
use complaints_core::domains::staff::{CreateStaffUser, StaffMember, StaffUser};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "manage")]
#[command(about = "DISCO complaints portal administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a login identity
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        full_name: String,
        #[arg(long)]
        email: Option<String>,
        /// May view the leadership dashboard
        #[arg(long)]
        staff: bool,
        #[arg(long)]
        superuser: bool,
    },

    /// Attach a staff profile to an existing login identity
    CreateStaff {
        #[arg(long)]
        username: String,
        /// e.g. "Billing Officer"; matched against category first-level roles
        #[arg(long)]
        role: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        region: Option<String>,
    },

    /// Create a complaint category
    CreateCategory {
        #[arg(long)]
        name: String,
        /// Staff role that receives new tickets in this category
        #[arg(long)]
        first_level_role: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// List staff members
    ListStaff,

    /// List complaint categories
    ListCategories,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn output<T: Serialize>(message: impl Into<String>, data: T) -> Result<()> {
    let resp = Response {
        success: true,
        message: Some(message.into()),
        data: Some(data),
    };
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let pool = get_pool().await?;

    let result = match cli.command {
        Commands::CreateUser {
            username,
            password,
            full_name,
            email,
            staff,
            superuser,
        } => cmd_create_user(&pool, username, password, full_name, email, staff, superuser).await,
        Commands::CreateStaff {
            username,
            role,
            department,
            region,
        } => cmd_create_staff(&pool, &username, role, department, region).await,
        Commands::CreateCategory {
            name,
            first_level_role,
            description,
        } => cmd_create_category(&pool, name, first_level_role, description).await,
        Commands::ListStaff => cmd_list_staff(&pool).await,
        Commands::ListCategories => cmd_list_categories(&pool).await,
    };

    if let Err(e) = &result {
        let resp: Response<()> = Response {
            success: false,
            message: Some(format!("{:#}", e)),
            data: None,
        };
        println!("{}", serde_json::to_string(&resp)?);
    }
    result
}

async fn get_pool() -> Result<PgPool> {
    let config = Config::from_env()?;
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    Ok(pool)
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_create_user(
    pool: &PgPool,
    username: String,
    password: String,
    full_name: String,
    email: Option<String>,
    staff: bool,
    superuser: bool,
) -> Result<()> {
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    if User::find_by_username(&username, pool).await?.is_some() {
        bail!("User '{}' already exists", username);
    }

    let input = CreateUser::builder()
        .username(username)
        .full_name(full_name)
        .password_hash(hash_password(&password)?)
        .is_staff(staff)
        .is_superuser(superuser)
        .build();
    let input = CreateUser { email, ..input };

    let user = User::create(input, pool).await?;
    output(format!("Created user {}", user.username), user)
}

async fn cmd_create_staff(
    pool: &PgPool,
    username: &str,
    role: String,
    department: Option<String>,
    region: Option<String>,
) -> Result<()> {
    let user = User::find_by_username(username, pool)
        .await?
        .with_context(|| format!("No user named '{}'", username))?;
    if StaffUser::find_by_user_id(user.id, pool).await?.is_some() {
        bail!("User '{}' already has a staff profile", username);
    }

    let staff = StaffUser::create(
        CreateStaffUser {
            user_id: user.id,
            role,
            department,
            region,
        },
        pool,
    )
    .await?;
    output(format!("Created staff profile for {}", username), staff)
}

async fn cmd_create_category(
    pool: &PgPool,
    name: String,
    first_level_role: String,
    description: Option<String>,
) -> Result<()> {
    let category = Category::create(
        CreateCategory {
            name,
            description,
            default_first_level_role: first_level_role,
        },
        pool,
    )
    .await?;
    output(format!("Created category {}", category.name), category)
}

async fn cmd_list_staff(pool: &PgPool) -> Result<()> {
    let staff = StaffMember::find_all(pool).await?;
    output(format!("{} staff members", staff.len()), staff)
}

async fn cmd_list_categories(pool: &PgPool) -> Result<()> {
    let categories = Category::find_all(pool).await?;
    output(format!("{} categories", categories.len()), categories)
}
