//! Login action - exchanges username/password for a bearer token

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::common::validation::{required_text, FieldErrors};
use crate::common::{AuthError, UserId, Validated};
use crate::domains::accounts::models::User;
use crate::domains::accounts::password::verify_password;
use crate::kernel::ServerDeps;

/// Raw login form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Validated credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Validated<Credentials> {
        let mut errors = FieldErrors::new();
        let username = required_text(&mut errors, "username", self.username.as_deref(), Some(150));
        // Passwords are not trimmed
        let password = match self.password.as_deref() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => {
                errors.add("password", "This field is required.");
                String::new()
            }
        };
        errors.into_result(|| Credentials { username, password })
    }
}

/// Issued token plus what the client needs to route the user
#[derive(Debug, Clone, Serialize)]
pub struct LoginToken {
    pub token: String,
    pub token_type: &'static str,
    pub user_id: UserId,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Verify credentials and issue a JWT.
///
/// Unknown usernames, inactive accounts and wrong passwords all yield the
/// same `InvalidCredentials` error.
pub async fn login(credentials: &Credentials, deps: &ServerDeps) -> Result<LoginToken, AuthError> {
    let user = User::find_by_username(&credentials.username, &deps.db_pool)
        .await?
        .filter(|user| user.is_active);

    let Some(user) = user else {
        debug!(username = %credentials.username, "Login rejected: unknown or inactive user");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(&credentials.password, &user.password_hash) {
        debug!(username = %credentials.username, "Login rejected: bad password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = deps.jwt_service.create_token(
        user.id,
        user.username.clone(),
        user.is_staff,
        user.is_superuser,
    )?;

    info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(LoginToken {
        token,
        token_type: "Bearer",
        user_id: user.id,
        username: user.username,
        is_staff: user.is_staff,
        is_superuser: user.is_superuser,
    })
}
