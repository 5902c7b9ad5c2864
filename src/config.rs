//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`) and every one of them has a default, so the service starts
//! against a local `teamavail` database with no configuration at all.
//! The HTTP listening port is fixed at [`LISTEN_PORT`].

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Port the HTTP server binds to.
pub const LISTEN_PORT: u16 = 3000;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `DB_PORT` is set but is not a valid TCP port.
    #[error("invalid DB_PORT value: {0:?}")]
    InvalidPort(String),
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to (`0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// PostgreSQL connection and pool settings.
    pub database: DatabaseConfig,

    /// Directories served as static assets.
    pub assets: AssetConfig,
}

/// PostgreSQL connection and pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database host name.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database name.
    pub name: String,
    /// Role used to connect.
    pub user: String,
    /// Password for [`DatabaseConfig::user`].
    pub password: String,
    /// Upper bound on simultaneously open connections.
    pub max_connections: u32,
    /// How long an unused connection may sit in the pool before it is closed.
    pub idle_timeout: Duration,
    /// How long a caller waits for a free connection before failing.
    pub connection_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "teamavail".to_string(),
            user: "teamavail".to_string(),
            password: "teamavail_password".to_string(),
            max_connections: 20,
            idle_timeout: Duration::from_millis(30_000),
            connection_timeout: Duration::from_millis(2_000),
        }
    }
}

/// Static asset directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Frontend files, served at `/`.
    pub public_dir: PathBuf,
    /// Input data files, served at `/input`.
    pub input_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            input_dir: PathBuf::from("input"),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file
    /// first, then falls back to defaults for every unset variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `DB_PORT` is set but cannot
    /// be parsed as a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset, so `DB_HOST=` in a `.env` file keeps
    /// the default host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `DB_PORT` is present but
    /// cannot be parsed as a port number.
    pub fn from_lookup<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| source(key).filter(|v| !v.trim().is_empty());
        let defaults = DatabaseConfig::default();

        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let database = DatabaseConfig {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port,
            name: lookup("DB_NAME").unwrap_or(defaults.name),
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections),
            idle_timeout: parse_millis_or(&lookup, "DB_IDLE_TIMEOUT_MS", defaults.idle_timeout),
            connection_timeout: parse_millis_or(
                &lookup,
                "DB_CONNECTION_TIMEOUT_MS",
                defaults.connection_timeout,
            ),
        };

        let asset_defaults = AssetConfig::default();
        let assets = AssetConfig {
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(asset_defaults.public_dir),
            input_dir: lookup("INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(asset_defaults.input_dir),
        };

        Ok(Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, LISTEN_PORT)),
            database,
            assets,
        })
    }
}

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_millis_or<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}
