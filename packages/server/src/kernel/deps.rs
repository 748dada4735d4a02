//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! actions and HTTP handlers. External services sit behind trait objects so
//! tests can swap in spies.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::domains::accounts::JwtService;
use crate::domains::notifications::NotificationDispatcher;
use crate::kernel::BaseMailer;

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub mailer: Arc<dyn BaseMailer>,
    /// Immutable, process-wide configuration
    pub config: Arc<Config>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, mailer: Arc<dyn BaseMailer>, config: Arc<Config>) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.secret_key,
            config.jwt_issuer.clone(),
        ));

        Self {
            db_pool,
            mailer,
            config,
            jwt_service,
        }
    }

    /// Customer notification dispatcher bound to this process's mailer and site URL
    pub fn notifier(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(self.mailer.clone(), &self.config.site_base_url)
    }
}
