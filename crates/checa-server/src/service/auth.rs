//! JWT signing key material.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};

/// Paired encoding and decoding keys for authentication tokens.
///
/// Cheap to clone; both keys share one allocation.
#[derive(Clone)]
pub struct AuthKeys {
    inner: Arc<AuthKeysInner>,
}

struct AuthKeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    /// Derives both keys from a shared HMAC secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            inner: Arc::new(AuthKeysInner {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
        }
    }

    /// Returns the key used to sign new tokens.
    #[inline]
    pub fn encoding(&self) -> &EncodingKey {
        &self.inner.encoding
    }

    /// Returns the key used to validate presented tokens.
    #[inline]
    pub fn decoding(&self) -> &DecodingKey {
        &self.inner.decoding
    }
}

impl fmt::Debug for AuthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthKeys").finish_non_exhaustive()
    }
}
