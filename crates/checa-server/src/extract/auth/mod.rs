//! Authentication extractors: JWT claims and the resolved account.

mod auth_claims;
mod auth_state;
mod current_account;

/// Tracing target for authentication operations.
pub(crate) const TRACING_TARGET_AUTHENTICATION: &str = "checa_server::authentication";

pub use self::auth_claims::AuthClaims;
pub use self::auth_state::AuthState;
pub use self::current_account::CurrentAccount;
