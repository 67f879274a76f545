use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use shared::constants::SPIN_DURATION_MS;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. Without one the service keeps recipes in memory.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub cors_origin: Option<HeaderValue>,
    pub spin_window: Duration,
    /// How long a finished spin session is kept so the next spin continues its rotation.
    pub session_idle_timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr(String),
    InvalidCorsOrigin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBindAddr(value) => write!(f, "BIND_ADDR is not a socket address: {}", value),
            Self::InvalidCorsOrigin(value) => write!(f, "CORS_ORIGIN is not a valid origin: {}", value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_value.clone()))?;

        let cors_origin = match lookup("CORS_ORIGIN") {
            Some(origin) => Some(
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?,
            ),
            None => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            cors_origin,
            spin_window: Duration::from_millis(SPIN_DURATION_MS),
            session_idle_timeout: SESSION_IDLE_TIMEOUT,
        })
    }
}
