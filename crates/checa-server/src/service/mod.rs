//! Service configuration, shared state, and supporting infrastructure.

mod auth;
mod cache;
mod config;
mod state;

pub use self::auth::AuthKeys;
pub use self::cache::VerificationCache;
pub use self::config::ServiceConfig;
pub use self::state::ServiceState;

/// A specialized [`Result`] for service initialization.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = crate::handler::Error<'static>> = std::result::Result<T, E>;
