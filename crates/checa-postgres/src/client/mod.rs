//! Database client, configuration, and migration management.

mod migrate;
mod pg_client;
mod pg_config;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;

pub use self::migrate::run_pending_migrations;
pub use self::pg_client::{PgClient, PgPoolStatus};
pub use self::pg_config::PgConfig;

/// Connection pool type used by [`PgClient`].
pub type ConnectionPool = deadpool::managed::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// A single connection checked out of the pool.
///
/// Implements [`AsyncConnection`] through the pool object, so it can be passed
/// directly to diesel query methods. Returned to the pool on drop.
///
/// [`AsyncConnection`]: diesel_async::AsyncConnection
pub type PooledConnection =
    deadpool::managed::Object<AsyncDieselConnectionManager<AsyncPgConnection>>;
