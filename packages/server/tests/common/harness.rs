//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container is shared by every test. Migrations run once into a
//! template database; each test then gets its own database cloned from that
//! template, so ticket numbering and dashboard counts start from zero.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::{Mutex, OnceCell};
use tower::ServiceExt;
use uuid::Uuid;

use complaints_core::kernel::test_dependencies::SpyMailer;
use complaints_core::kernel::{BaseMailer, ServerDeps};
use complaints_core::server::build_app;
use complaints_core::Config;

const TEMPLATE_DB: &str = "complaints_template";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    /// Server URL without a database name
    server_url: String,
    // Keep container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

/// CREATE DATABASE ... TEMPLATE must not overlap for the same template
static CLONE_LOCK: Mutex<()> = Mutex::const_new(());

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let server_url = format!("postgresql://postgres:postgres@{}:{}", pg_host, pg_port);

        let admin = PgPool::connect(&format!("{}/postgres", server_url))
            .await
            .context("Failed to connect to Postgres")?;
        sqlx::query(&format!("CREATE DATABASE {}", TEMPLATE_DB))
            .execute(&admin)
            .await
            .context("Failed to create template database")?;
        admin.close().await;

        let template = PgPool::connect(&format!("{}/{}", server_url, TEMPLATE_DB))
            .await
            .context("Failed to connect to template database")?;
        sqlx::migrate!("./migrations")
            .run(&template)
            .await
            .context("Failed to run migrations")?;
        // Cloning requires that nobody is connected to the template
        template.close().await;

        Ok(Self {
            server_url,
            _postgres: postgres,
        })
    }

    pub(super) async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }

    async fn fresh_database(&self) -> Result<String> {
        let name = format!("test_{}", Uuid::new_v4().simple());
        let _guard = CLONE_LOCK.lock().await;
        let admin = PgPool::connect(&format!("{}/postgres", self.server_url)).await?;
        sqlx::query(&format!("CREATE DATABASE {} TEMPLATE {}", name, TEMPLATE_DB))
            .execute(&admin)
            .await
            .with_context(|| format!("Failed to create database {}", name))?;
        admin.close().await;
        Ok(format!("{}/{}", self.server_url, name))
    }
}

/// Test harness: a private database, server dependencies wired to a
/// `SpyMailer`, and the HTTP router.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let (status, body) = ctx.get("/categories/", None).await;
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
    pub deps: ServerDeps,
    /// Every email the portal sent during the test
    pub mailer: SpyMailer,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

/// Decoded HTTP response
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: serde_json::Value,
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let mailer = SpyMailer::new();
        Self::with_mailer(Arc::new(mailer.clone()), mailer).await
    }

    /// Harness whose server sends mail through `mailer` instead of the spy
    pub async fn with_mailer(mailer: Arc<dyn BaseMailer>, spy: SpyMailer) -> Result<Self> {
        let infra = SharedTestInfra::get().await;
        let database_url = infra.fresh_database().await?;

        let db_pool = PgPool::connect(&database_url)
            .await
            .context("Failed to connect to test database")?;

        let config = Arc::new(Config::for_testing(database_url));
        let deps = ServerDeps::new(db_pool.clone(), mailer, config);

        Ok(Self {
            db_pool,
            deps,
            mailer: spy,
        })
    }

    pub fn app(&self) -> Router {
        build_app(self.deps.clone())
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, None, token).await
    }

    /// POST an urlencoded form
    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        token: Option<&str>,
    ) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.send(Method::POST, uri, Some(body), token).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        form: Option<String>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match form {
            Some(form) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
        };

        TestResponse {
            status,
            location,
            body,
        }
    }
}
