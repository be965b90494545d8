use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::filter::LevelFilter;

/// Default listen address; a leading `:` binds every interface.
pub const DEFAULT_ADDR: &str = ":7836";
pub const DEFAULT_VERSION: &str = "development";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// How long in-flight requests may run after a shutdown signal.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Deadline for reaching the database and applying migrations at startup.
pub const STARTUP_DEADLINE: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("invalid log level {0}")]
    InvalidLogLevel(String),

    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from `TODO_*` environment variables.
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    /// Shared secret expected in `Authorization: Bearer <token>`.
    pub auth_token: String,
    /// Listen address as configured, e.g. `:7836` or `127.0.0.1:8080`.
    pub addr: String,
    /// Reported by `GET /api/v1/version`.
    pub version: String,
    pub log_level: LevelFilter,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                     | Default       |
    /// |-----------------------------|---------------|
    /// | `TODO_DATABASE_URL`         | required      |
    /// | `TODO_AUTH_TOKEN`           | required      |
    /// | `TODO_ADDR`                 | `:7836`       |
    /// | `TODO_VERSION`              | `development` |
    /// | `TODO_LOG_LEVEL`            | `info`        |
    /// | `TODO_REQUEST_TIMEOUT_SECS` | `15`          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let database_url = var("TODO_DATABASE_URL").ok_or(ConfigError::Missing("TODO_DATABASE_URL"))?;
        let auth_token = var("TODO_AUTH_TOKEN").ok_or(ConfigError::Missing("TODO_AUTH_TOKEN"))?;
        let addr = var("TODO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into());
        let version = var("TODO_VERSION").unwrap_or_else(|| DEFAULT_VERSION.into());

        let log_level = var("TODO_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into());
        let log_level =
            LevelFilter::from_str(&log_level).map_err(|_| ConfigError::InvalidLogLevel(log_level))?;

        let request_timeout_secs = match var("TODO_REQUEST_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "TODO_REQUEST_TIMEOUT_SECS",
                value,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url,
            auth_token,
            addr,
            version,
            log_level,
            request_timeout_secs,
        })
    }

    /// The address to hand to the TCP listener.
    pub fn bind_addr(&self) -> String {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .field("addr", &self.addr)
            .field("version", &self.version)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
