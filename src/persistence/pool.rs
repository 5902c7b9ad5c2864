//! Connection pool construction.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::DatabaseConfig;

/// Builds a lazily connecting pool from `config`.
///
/// No connection is opened here; the first one is established by the
/// first query, normally the table initialization at startup. Callers
/// beyond `max_connections` queue for up to `connection_timeout` and then
/// fail with a pool timeout. Connections idle for longer than
/// `idle_timeout` are closed.
///
/// Must be called from within a Tokio runtime.
#[must_use]
pub fn connect_lazy(config: &DatabaseConfig) -> PgPool {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password);

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connection_timeout)
        .idle_timeout(config.idle_timeout)
        .connect_lazy_with(options)
}
