use anyhow::{Context, Result};
use tracing::warn;

/// Application configuration loaded from environment variables once at startup.
/// Collaborators receive this by reference instead of reading the environment
/// at call time.
#[derive(Debug, Clone)]
pub struct Config {
    pub ashby_api_key: String,
    /// When set, incoming webhooks must carry a matching HMAC-SHA256 signature.
    pub webhook_secret: Option<String>,
    /// Present only when all SMTP settings are configured.
    pub smtp: Option<SmtpConfig>,
    pub port: u16,
    pub rust_log: String,
}

/// Settings for the outbound mail collaborator. All fields are required for a
/// session to be attempted at all.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ashby_api_key: require_env("ASHBY_API_KEY")?,
            webhook_secret: optional_env("ASHBY_WEBHOOK_SECRET"),
            smtp: SmtpConfig::from_env()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl SmtpConfig {
    /// Returns `None` unless every SMTP variable is set; a partially
    /// configured mailer is treated as no mailer at all.
    fn from_env() -> Result<Option<Self>> {
        let host = optional_env("SMTP_HOST");
        let user = optional_env("SMTP_USER");
        let password = optional_env("SMTP_PASSWORD");
        let from = optional_env("EMAIL_FROM");
        let to = optional_env("EMAIL_TO");

        match (host, user, password, from, to) {
            (Some(host), Some(user), Some(password), Some(from), Some(to)) => {
                let port = std::env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse::<u16>()
                    .context("SMTP_PORT must be a valid port number")?;
                Ok(Some(SmtpConfig {
                    host,
                    port,
                    user,
                    password,
                    from,
                    to,
                }))
            }
            (None, None, None, None, None) => Ok(None),
            _ => {
                warn!("Partial SMTP configuration found; email notifications disabled");
                Ok(None)
            }
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
