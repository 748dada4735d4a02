use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Secret used when DISCO_SECRET_KEY is not set. Only acceptable in debug mode.
pub const INSECURE_DEV_SECRET: &str = "dev-only-insecure-change-me";

/// Outbound mail backend selected by DISCO_EMAIL_BACKEND
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBackend {
    /// Log messages instead of sending them (local development)
    Console,
    /// Relay through an SMTP server
    Smtp(SmtpSettings),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Application configuration loaded from environment variables.
///
/// Built once at startup and shared read-only (behind an `Arc`) with every
/// component that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub secret_key: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub email_backend: EmailBackend,
    pub default_from_email: String,
    pub site_base_url: String,
    pub jwt_issuer: String,
    /// Per-IP request rate for the public router; `None` disables limiting
    pub rate_limit_per_second: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let debug = env_bool("DISCO_DEBUG", true);

        let secret_key =
            env::var("DISCO_SECRET_KEY").unwrap_or_else(|_| INSECURE_DEV_SECRET.to_string());
        if !debug && secret_key == INSECURE_DEV_SECRET {
            bail!("DISCO_SECRET_KEY must be set when DISCO_DEBUG is off");
        }

        let allowed_hosts = resolve_allowed_hosts(debug, env_list("DISCO_ALLOWED_HOSTS"));

        let email_backend = match env::var("DISCO_EMAIL_BACKEND")
            .unwrap_or_else(|_| "console".to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "console" => EmailBackend::Console,
            "smtp" => EmailBackend::Smtp(SmtpSettings {
                host: env::var("SMTP_HOST")
                    .context("SMTP_HOST must be set when DISCO_EMAIL_BACKEND=smtp")?,
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .context("SMTP_PORT must be a valid number")?,
                username: env::var("SMTP_USERNAME").ok(),
                password: env::var("SMTP_PASSWORD").ok(),
            }),
            other => bail!("Unknown DISCO_EMAIL_BACKEND: {}", other),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            secret_key,
            debug,
            allowed_hosts,
            email_backend,
            default_from_email: env::var("DEFAULT_FROM_EMAIL")
                .unwrap_or_else(|_| "DISCO Complaints <no-reply@example.com>".to_string()),
            site_base_url: normalize_base_url(
                &env::var("SITE_BASE_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            ),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "disco-complaints".to_string()),
            rate_limit_per_second: match env::var("DISCO_RATE_LIMIT_PER_SECOND") {
                Ok(raw) => {
                    let rate: u64 = raw
                        .trim()
                        .parse()
                        .context("DISCO_RATE_LIMIT_PER_SECOND must be a valid number")?;
                    (rate > 0).then_some(rate)
                }
                Err(_) => Some(10),
            },
        })
    }

    /// Configuration for tests and local tooling; console mail, debug on.
    pub fn for_testing(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            port: 0,
            secret_key: "test-secret-key".to_string(),
            debug: true,
            allowed_hosts: vec!["*".to_string()],
            email_backend: EmailBackend::Console,
            default_from_email: "DISCO Complaints <no-reply@example.com>".to_string(),
            site_base_url: "http://testserver".to_string(),
            jwt_issuer: "disco-complaints-test".to_string(),
            rate_limit_per_second: None,
        }
    }

    /// Whether a request `Host` header value is accepted.
    ///
    /// An empty allow-list rejects everything; `*` is a wildcard entry.
    pub fn is_host_allowed(&self, host: &str) -> bool {
        let host = host.split(':').next().unwrap_or(host);
        self.allowed_hosts
            .iter()
            .any(|allowed| allowed == "*" || allowed.eq_ignore_ascii_case(host))
    }
}

/// Debug mode falls back to the loopback hosts; otherwise the list is taken
/// as given, so an unset `DISCO_ALLOWED_HOSTS` serves no host at all.
fn resolve_allowed_hosts(debug: bool, configured: Vec<String>) -> Vec<String> {
    if debug && configured.is_empty() {
        vec!["127.0.0.1".to_string(), "localhost".to_string()]
    } else {
        configured
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_bool(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn parse_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Read a boolean flag; unset falls back to `default`.
pub fn env_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|v| parse_bool(&v)).unwrap_or(default)
}

/// Read a comma-separated list; unset or empty yields an empty list.
pub fn env_list(name: &str) -> Vec<String> {
    env::var(name).map(|v| parse_list(&v)).unwrap_or_default()
}
