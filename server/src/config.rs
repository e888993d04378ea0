//! Server configuration from environment variables.

use foodgram_core::Page;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default session lifetime in days.
pub const DEFAULT_SESSION_DAYS: i64 = 30;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Upper bound for any client-requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Lowercased emails that are granted administrator rights at signup.
    pub admin_emails: Vec<String>,
    pub session_days: i64,
    pub page_size: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`: PostgreSQL connection string
    ///
    /// Optional:
    /// - `FOODGRAM_BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `FOODGRAM_ADMIN_EMAILS`: comma separated administrator emails
    /// - `FOODGRAM_SESSION_DAYS`: session lifetime in days (default: 30)
    /// - `FOODGRAM_PAGE_SIZE`: default page size (default: 6, max: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_raw = lookup("FOODGRAM_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name: "FOODGRAM_BIND_ADDR".to_string(),
                value: bind_raw.clone(),
            })?;

        let admin_emails = lookup("FOODGRAM_ADMIN_EMAILS")
            .map(|raw| {
                raw.split(',')
                    .map(|e| e.trim().to_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let session_days = parse_positive(&lookup, "FOODGRAM_SESSION_DAYS", DEFAULT_SESSION_DAYS)?;
        let page_size =
            parse_positive(&lookup, "FOODGRAM_PAGE_SIZE", DEFAULT_PAGE_SIZE)?.min(MAX_PAGE_SIZE);

        Ok(Self {
            database_url,
            bind_addr,
            admin_emails,
            session_days,
            page_size,
        })
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|e| *e == email)
    }

    /// Resolve client pagination parameters. An explicit `offset` wins over a
    /// 1-based `page` number.
    pub fn page(&self, limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> Page {
        let limit = limit.unwrap_or(self.page_size).clamp(1, MAX_PAGE_SIZE);
        let offset = match (offset, page) {
            (Some(offset), _) => offset,
            (None, Some(page)) => (page.max(1) - 1).saturating_mul(limit),
            (None, None) => 0,
        };
        Page::new(limit, offset)
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: i64,
) -> Result<i64, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/foodgram")]).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.session_days, DEFAULT_SESSION_DAYS);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.admin_emails.is_empty());
    }

    #[test]
    fn test_database_url_required() {
        assert!(matches!(config(&[]), Err(ConfigError::MissingEnvVar(_))));
        assert!(matches!(
            config(&[("DATABASE_URL", " ")]),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let url = ("DATABASE_URL", "postgres://localhost/foodgram");
        assert!(matches!(
            config(&[url, ("FOODGRAM_BIND_ADDR", "nowhere")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config(&[url, ("FOODGRAM_SESSION_DAYS", "0")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config(&[url, ("FOODGRAM_PAGE_SIZE", "ten")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_admin_emails_are_case_insensitive() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/foodgram"),
            ("FOODGRAM_ADMIN_EMAILS", " Chef@Example.com, ,ops@example.com"),
        ])
        .unwrap();
        assert_eq!(config.admin_emails.len(), 2);
        assert!(config.is_admin_email("chef@example.COM"));
        assert!(!config.is_admin_email("cook@example.com"));
    }

    #[test]
    fn test_page_resolution() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/foodgram"),
            ("FOODGRAM_PAGE_SIZE", "500"),
        ])
        .unwrap();
        assert_eq!(config.page_size, MAX_PAGE_SIZE);

        assert_eq!(config.page(Some(10), None, Some(3)), Page::new(10, 20));
        assert_eq!(config.page(Some(10), Some(5), Some(3)), Page::new(10, 5));
        assert_eq!(config.page(Some(0), None, None), Page::new(1, 0));
        assert_eq!(config.page(None, None, Some(0)), Page::new(100, 0));
    }
}
