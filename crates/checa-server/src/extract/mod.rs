//! Request extractors with the portal's error responses.

mod auth;
mod json;
mod path;
mod query;
mod validate_json;

pub use self::auth::{AuthClaims, AuthState, CurrentAccount};
pub use self::json::Json;
pub use self::path::Path;
pub use self::query::Query;
pub use self::validate_json::ValidateJson;
