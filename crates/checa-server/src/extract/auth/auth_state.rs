use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::extract::auth::AuthClaims;
use crate::handler::{Error, ErrorKind};
use crate::service::AuthKeys;

/// Extracts and validates the bearer token on a request.
///
/// Only proves the token is genuine; it does not touch the database. The
/// authentication middleware layers the account lookup on top.
#[must_use]
#[derive(Debug, Clone)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Returns the validated claims.
    #[inline]
    pub fn into_claims(self) -> AuthClaims {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    AuthKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = <TypedHeader<Authorization<Bearer>> as FromRequestParts<S>>::from_request_parts(
            parts, state,
        )
        .await
        .map_err(|_| ErrorKind::MissingAuthToken.into_error())?;

        let auth_keys = AuthKeys::from_ref(state);
        let claims = AuthClaims::from_header(&header, auth_keys.decoding())?;

        Ok(Self(claims))
    }
}
