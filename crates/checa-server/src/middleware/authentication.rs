//! Authentication middleware for validating request credentials.

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn, from_fn_with_state};
use axum::response::Response;
use checa_postgres::PgClient;
use checa_postgres::model::Account;
use checa_postgres::query::AccountRepository;

use crate::extract::AuthState;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for authentication middleware.
const TRACING_TARGET: &str = "checa_server::authentication";

/// Extension trait for `axum::`[`Router`] to apply authentication middleware.
pub trait RouterAuthExt<S> {
    /// Requires valid authentication for all routes.
    ///
    /// Validates the `Authorization` header, loads the account, and rejects
    /// suspended or deactivated accounts.
    fn with_authentication(self, state: ServiceState) -> Self;

    /// Requires staff privileges (admin or finance) for all routes.
    ///
    /// Layers on top of [`RouterAuthExt::with_authentication`]; plain
    /// customers receive a 403 Forbidden response.
    fn with_staff_authentication(self, state: ServiceState) -> Self;
}

impl<S> RouterAuthExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_authentication(self, state: ServiceState) -> Self {
        self.layer(from_fn_with_state(state, require_authentication))
    }

    fn with_staff_authentication(self, state: ServiceState) -> Self {
        self.layer(from_fn(require_staff))
            .layer(from_fn_with_state(state, require_authentication))
    }
}

/// Requires a valid token backed by an active account.
///
/// On success the resolved [`Account`] is stored in the request extensions
/// for downstream extractors.
pub async fn require_authentication(
    AuthState(auth_claims): AuthState,
    State(pg_client): State<PgClient>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let account = pg_client
        .find_account_by_id(auth_claims.account_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                target: TRACING_TARGET,
                account_id = %auth_claims.account_id,
                "token references an unknown account"
            );
            ErrorKind::Unauthorized.into_error()
        })?;

    ensure_active(&account)?;

    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

/// Rejects a valid token whose account may no longer act on the portal.
///
/// The credentials themselves are fine, so this is a 403, not a 401.
fn ensure_active(account: &Account) -> Result<()> {
    if account.is_active() {
        return Ok(());
    }

    tracing::warn!(
        target: TRACING_TARGET,
        account_id = %account.id,
        status = %account.status,
        "inactive account attempted an authenticated request"
    );
    Err(ErrorKind::Forbidden
        .with_message("This account is no longer active")
        .into_static())
}

/// Requires the already-authenticated account to hold a staff role.
pub async fn require_staff(request: Request, next: Next) -> Result<Response> {
    let account = request
        .extensions()
        .get::<Account>()
        .ok_or_else(|| ErrorKind::MissingAuthToken.into_error())?;

    if !account.role.can_verify_documents() {
        tracing::warn!(
            target: TRACING_TARGET,
            account_id = %account.id,
            role = %account.role,
            "non-staff account attempted a staff route"
        );
        return Err(ErrorKind::Forbidden.into_error());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use checa_postgres::types::{AccountRole, AccountStatus};
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;

    fn account(status: AccountStatus) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "customer@example.edu.my".to_string(),
            first_name: "Siti".to_string(),
            last_name: "Rahman".to_string(),
            role: AccountRole::Customer,
            status,
            is_external: false,
            company: None,
            branch: None,
            ikohza: None,
            faculty: None,
            department: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn active_accounts_pass() {
        assert!(ensure_active(&account(AccountStatus::Active)).is_ok());
    }

    #[test]
    fn inactive_accounts_are_forbidden() {
        let error = ensure_active(&account(AccountStatus::Suspended)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Forbidden);

        let error = ensure_active(&account(AccountStatus::Deactivated)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Forbidden);
    }
}
