//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::{allowed_hosts_middleware, jwt_auth_middleware};
use crate::server::routes::{
    create_complaint_handler, dashboard_handler, feedback_form_handler, health_handler,
    list_categories_handler, login_handler, post_login_handler, staff_ticket_action_handler,
    staff_ticket_detail_handler, staff_ticket_list_handler, submit_feedback_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let config = deps.config.clone();
    let app_state = AppState {
        db_pool: deps.db_pool.clone(),
        deps: deps.clone(),
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let jwt_service_for_middleware = deps.jwt_service.clone();
    let config_for_hosts = config.clone();

    // Anonymous endpoints: complaint intake, login and customer feedback
    let mut public = Router::new()
        .route("/new/", post(create_complaint_handler))
        .route("/accounts/login/", post(login_handler))
        .route(
            "/feedback/:ticket_id/",
            get(feedback_form_handler).post(submit_feedback_handler),
        );

    // Rate limiting: `rate` requests per second per peer IP, bursts of twice that.
    // Keys come from the socket address (ConnectInfo); forwarding headers are ignored.
    if let Some(rate) = config.rate_limit_per_second {
        let governor_config = GovernorConfigBuilder::default()
            .per_millisecond((1000 / rate).max(1))
            .burst_size((rate * 2).min(u32::MAX as u64) as u32)
            .use_headers() // x-ratelimit-* response headers
            .finish();
        match governor_config {
            Some(governor_config) => {
                public = public.layer(GovernorLayer {
                    config: Arc::new(governor_config),
                });
            }
            None => warn!(rate, "Invalid rate limit configuration; rate limiting disabled"),
        }
    }

    Router::new()
        .route("/health", get(health_handler))
        .route("/categories/", get(list_categories_handler))
        .route("/post-login/", get(post_login_handler))
        .route("/staff/tickets/", get(staff_ticket_list_handler))
        .route(
            "/staff/tickets/:ticket_id/",
            get(staff_ticket_detail_handler).post(staff_ticket_action_handler),
        )
        .route("/staff/dashboard/", get(dashboard_handler))
        .merge(public)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        })) // JWT authentication
        .layer(Extension(app_state))
        .layer(middleware::from_fn(move |req, next| {
            allowed_hosts_middleware(config_for_hosts.clone(), req, next)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
