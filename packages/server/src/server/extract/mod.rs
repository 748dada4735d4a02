//! Request extractors for authenticated pages.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

/// Signed-in user, required.
///
/// Anonymous requests are redirected to the login page with the original
/// path and query in `next`.
#[derive(Debug, Clone)]
pub struct RequireUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthUser>() {
            Some(user) => Ok(RequireUser(user.clone())),
            None => Err(ApiError::LoginRequired {
                next: parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| parts.uri.path().to_string()),
            }),
        }
    }
}
