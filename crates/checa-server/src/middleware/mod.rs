//! Middleware for authentication, authorization, and request tracing.

mod authentication;
mod observability;

pub use self::authentication::{RouterAuthExt, require_authentication, require_staff};
pub use self::observability::RouterObservabilityExt;
