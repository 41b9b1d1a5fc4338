use std::net::IpAddr;
use std::time::Duration;

use axum::http::HeaderValue;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origin: HeaderValue,
    pub max_body_size: usize,
    pub chrome_executable: Option<String>,
    pub render_timeout_secs: u64,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    /// System mailbox: enquiry mail is sent from and to this address.
    pub mailbox: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("UKTOURISM_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid UKTOURISM_HOST: {e}"))?;

        let port: u16 = env_or("UKTOURISM_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid UKTOURISM_PORT: {e}"))?;

        let allowed_origin: HeaderValue = env_or("UKTOURISM_ALLOWED_ORIGIN", "http://localhost:3000")
            .parse()
            .map_err(|e| format!("Invalid UKTOURISM_ALLOWED_ORIGIN: {e}"))?;

        let max_body_size: usize = env_or("UKTOURISM_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid UKTOURISM_MAX_BODY_SIZE: {e}"))?;

        let chrome_executable = std::env::var("UKTOURISM_CHROME").ok();

        let render_timeout_secs: u64 = env_or("UKTOURISM_RENDER_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid UKTOURISM_RENDER_TIMEOUT_SECS: {e}"))?;

        let log_level = env_or("UKTOURISM_LOG_LEVEL", "info");

        // Mail is enabled by the credential pair; relay details default to Gmail.
        let smtp = match (
            std::env::var("UKTOURISM_SMTP_USER").ok(),
            std::env::var("UKTOURISM_SMTP_PASS").ok(),
        ) {
            (Some(user), Some(pass)) => Some(SmtpConfig {
                host: env_or("UKTOURISM_SMTP_HOST", "smtp.gmail.com"),
                port: env_or("UKTOURISM_SMTP_PORT", "587")
                    .parse()
                    .map_err(|e| format!("Invalid UKTOURISM_SMTP_PORT: {e}"))?,
                mailbox: env_or("UKTOURISM_MAILBOX", &user),
                user,
                pass,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            allowed_origin,
            max_body_size,
            chrome_executable,
            render_timeout_secs,
            log_level,
            smtp,
        })
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
