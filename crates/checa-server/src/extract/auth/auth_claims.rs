use std::borrow::Cow;

use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use checa_postgres::model::Account;
use checa_postgres::types::AccountRole;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::extract::auth::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{ErrorKind, Result};

/// JWT claims for authentication tokens.
///
/// Standard RFC 7519 claims plus the account role, which authorization
/// middleware reads without a database round trip.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    /// Issuer (who created the token).
    #[serde(rename = "iss")]
    issued_by: Cow<'static, str>,
    /// Audience (who the token is intended for).
    #[serde(rename = "aud")]
    audience: Cow<'static, str>,

    /// JWT ID (unique identifier for token, useful for revocation).
    #[serde(rename = "jti")]
    pub token_id: Uuid,
    /// Subject ID (unique identifier for the associated account).
    #[serde(rename = "sub")]
    pub account_id: Uuid,

    /// Issued at (as unix timestamp).
    #[serde(rename = "iat", with = "time::serde::timestamp")]
    pub issued_at: OffsetDateTime,
    /// Expiration time (as unix timestamp).
    #[serde(rename = "exp", with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,

    /// Authorization role at issuance time.
    #[serde(rename = "rol")]
    pub role: AccountRole,
}

impl AuthClaims {
    /// Default JWT audience identifier for authentication tokens.
    const JWT_AUDIENCE: &str = "checa:server";
    /// Default JWT issuer identifier for authentication tokens.
    const JWT_ISSUER: &str = "checa";

    /// Creates claims for the given account with the given lifetime.
    pub fn new(account: &Account, lifetime: Duration) -> Self {
        // `iat`/`exp` travel as whole unix seconds; keep the in-memory
        // claims at the same precision so decoded tokens compare equal.
        let now = OffsetDateTime::now_utc();
        let issued_at = now - Duration::nanoseconds(now.nanosecond().into());
        Self {
            issued_by: Cow::Borrowed(Self::JWT_ISSUER),
            audience: Cow::Borrowed(Self::JWT_AUDIENCE),
            token_id: Uuid::new_v4(),
            account_id: account.id,
            issued_at,
            expires_at: issued_at + lifetime,
            role: account.role,
        }
    }

    /// Checks whether the token has expired.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }

    /// Encodes the claims into a signed JWT token.
    pub fn into_token(self, encoding_key: &EncodingKey) -> Result<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, &self, encoding_key).map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %error,
                account_id = %self.account_id,
                "Failed to encode JWT token"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .into_static()
        })
    }

    /// Parses and validates a JWT token from an Authorization header.
    ///
    /// Validates the signature, the standard claims, and expiration.
    pub fn from_header(
        auth_header: &TypedHeader<Authorization<Bearer>>,
        decoding_key: &DecodingKey,
    ) -> Result<Self> {
        let auth_token = auth_header.token();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = true;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "jti", "sub", "iat", "exp"]);

        let token_data =
            decode::<Self>(auth_token, decoding_key, &validation).map_err(|error| {
                tracing::warn!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %error,
                    "JWT token validation failed"
                );

                match error.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => ErrorKind::Unauthorized
                        .with_message("Authentication session has expired")
                        .into_static(),
                    _ => ErrorKind::MalformedAuthToken.into_error(),
                }
            })?;

        let claims = token_data.claims;

        // Belt and braces on top of validate_exp.
        if claims.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                account_id = %claims.account_id,
                "JWT token validation failed: token expired"
            );

            return Err(ErrorKind::Unauthorized
                .with_message("Authentication session has expired")
                .into_static());
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use checa_postgres::types::AccountStatus;

    use super::*;

    fn account(role: AccountRole) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "finance@checa-lab.edu.my".to_string(),
            first_name: "Fin".to_string(),
            last_name: "Officer".to_string(),
            role,
            status: AccountStatus::Active,
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
    fn round_trips_through_token() {
        let secret = b"test-secret";
        let encoding = EncodingKey::from_secret(secret);
        let decoding = DecodingKey::from_secret(secret);

        let claims = AuthClaims::new(&account(AccountRole::Finance), Duration::hours(1));
        assert_eq!(claims.issued_at.nanosecond(), 0);

        let token = claims.clone().into_token(&encoding).unwrap();

        let header = TypedHeader(Authorization::bearer(&token).unwrap());
        let parsed = AuthClaims::from_header(&header, &decoding).unwrap();

        assert_eq!(parsed, claims);
        assert_eq!(parsed.role, AccountRole::Finance);
        assert!(!parsed.is_expired());
    }

    #[test]
    fn expired_token_is_rejected() {
        let secret = b"test-secret";
        let encoding = EncodingKey::from_secret(secret);
        let decoding = DecodingKey::from_secret(secret);

        let claims = AuthClaims::new(&account(AccountRole::Customer), Duration::hours(-1));
        let token = claims.into_token(&encoding).unwrap();

        let header = TypedHeader(Authorization::bearer(&token).unwrap());
        let error = AuthClaims::from_header(&header, &decoding).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn garbage_token_is_malformed() {
        let decoding = DecodingKey::from_secret(b"test-secret");
        let header = TypedHeader(Authorization::bearer("not-a-jwt").unwrap());
        let error = AuthClaims::from_header(&header, &decoding).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedAuthToken);
    }
}
