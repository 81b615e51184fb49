use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use checa_postgres::model::Account;
use derive_more::{Deref, From};

use crate::handler::{Error, ErrorKind};

/// The authenticated account for the current request.
///
/// Populated by the authentication middleware; extracting it on a route
/// outside the authenticated group is a wiring bug and yields a 500.
#[must_use]
#[derive(Debug, Clone, Deref, From)]
pub struct CurrentAccount(pub Account);

impl CurrentAccount {
    /// Returns the inner account.
    #[inline]
    pub fn into_inner(self) -> Account {
        self.0
    }
}

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Account>()
            .cloned()
            .map(Self)
            .ok_or_else(|| {
                tracing::error!("CurrentAccount extracted outside the authenticated route group");
                ErrorKind::InternalServerError.into_error()
            })
    }
}
