//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use outreach::config::{DEFAULT_COURSE_KEYWORD, DEFAULT_PAGE_COUNT};

/// Admin web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Backend base URL (token, roster, send).
    pub backend_url: String,
    /// Gateway base URL (class listing).
    pub gateway_url: String,
    /// Keyword a class name must contain to be targeted.
    pub course_keyword: String,
    /// Class listing pages fetched per discovery.
    pub class_pages: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ADMIN_ADDR` | Server bind address | `127.0.0.1:8788` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:outreach.db?mode=rwc` |
    /// | `BACKEND_URL` | Token/roster/send host | `https://wxbackend.xdf.cn` |
    /// | `GATEWAY_URL` | Class listing host | `https://gateway.app.xdf.cn` |
    /// | `COURSE_KEYWORD` | Required class name keyword | `暑假` |
    /// | `CLASS_PAGES` | Listing pages per discovery | `3` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ADMIN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8788".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:outreach.db?mode=rwc".to_string());

        let backend_url = env::var("BACKEND_URL")
            .unwrap_or_else(|_| "https://wxbackend.xdf.cn".to_string());

        let gateway_url = env::var("GATEWAY_URL")
            .unwrap_or_else(|_| "https://gateway.app.xdf.cn".to_string());

        let course_keyword = env::var("COURSE_KEYWORD")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COURSE_KEYWORD.to_string());

        let class_pages = match env::var("CLASS_PAGES") {
            Ok(raw) => parse_pages(&raw)?,
            Err(_) => DEFAULT_PAGE_COUNT,
        };

        Ok(Self {
            addr,
            database_url,
            backend_url,
            gateway_url,
            course_keyword,
            class_pages,
        })
    }
}

fn parse_pages(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(pages) if pages > 0 => Ok(pages),
        _ => Err(ConfigError::InvalidPages(raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ADMIN_ADDR format")]
    InvalidAddr,

    #[error("CLASS_PAGES must be a positive integer, got {0:?}")]
    InvalidPages(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_must_be_positive() {
        assert_eq!(parse_pages(" 4 ").unwrap(), 4);
        assert!(parse_pages("0").is_err());
        assert!(parse_pages("three").is_err());
    }
}
