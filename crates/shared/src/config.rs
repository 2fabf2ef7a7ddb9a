//! Application configuration management.
//!
//! Connection parameters come from a secrets bundle with a single `[postgres]` section. The
//! bundle is mandatory: a missing file or a missing section fails the load, and callers treat
//! that as fatal at startup.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use url::Url;

/// Environment variable overriding the secrets bundle location.
pub const SECRETS_PATH_ENV: &str = "WORKCAST_SECRETS";

/// Default location of the secrets bundle, relative to the working directory.
pub const DEFAULT_SECRETS_PATH: &str = "config/secrets.toml";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection and pool configuration.
    pub postgres: PostgresConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Database configuration, read from the `[postgres]` section.
#[derive(Clone, Deserialize)]
pub struct PostgresConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    #[serde(default = "default_pg_port")]
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    #[serde(default)]
    pub password: String,
    /// Database name.
    pub dbname: String,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds allowed to open a new connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Seconds allowed to borrow a connection from the pool.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Per-call deadline for store operations, in seconds.
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_secs: u64,
}

fn default_pg_port() -> u16 {
    5432
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    20
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_statement_timeout() -> u64 {
    10
}

impl PostgresConfig {
    /// Builds the connection URL, percent-encoding credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the host, user, or password cannot form a valid URL.
    pub fn url(&self) -> Result<String, ConfigError> {
        let invalid = |what: &str| ConfigError::Message(format!("invalid postgres {what}"));

        let mut url = Url::parse(&format!("postgres://{}:{}", self.host, self.port))
            .map_err(|_| invalid("host"))?;
        url.set_username(&self.user).map_err(|()| invalid("user"))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| invalid("password"))?;
        }
        url.set_path(&self.dbname);

        Ok(url.into())
    }

    /// Connect timeout as a `Duration`.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Pool acquire timeout as a `Duration`.
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Per-call store deadline as a `Duration`.
    #[must_use]
    pub const fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.statement_timeout_secs)
    }
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("min_connections", &self.min_connections)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("statement_timeout_secs", &self.statement_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from the secrets bundle, the run-mode file and the environment.
    ///
    /// The bundle path is `WORKCAST_SECRETS` or `config/secrets.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle is missing, lacks the `[postgres]` section, or does not
    /// deserialize.
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = std::env::var(SECRETS_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_SECRETS_PATH.to_string());
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::load_from(Path::new(&secrets), &run_mode)
    }

    /// Loads configuration using an explicit secrets bundle path.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::load`].
    pub fn load_from(secrets: &Path, run_mode: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::File::from(secrets).required(true))
            .add_source(config::Environment::with_prefix("WORKCAST").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
