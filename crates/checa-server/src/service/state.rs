//! Application state and dependency injection.

use checa_postgres::PgClient;

use crate::service::{AuthKeys, Result, ServiceConfig, VerificationCache};
use crate::worker::{AuditHandle, AuditWorker};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pg_client: PgClient,
    auth_keys: AuthKeys,
    verification_cache: VerificationCache,
    audit_handle: AuditHandle,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the database and returns the state along with the audit
    /// worker, which the caller must spawn.
    pub fn from_config(config: &ServiceConfig) -> Result<(Self, AuditWorker)> {
        let pg_client = config.connect_postgres()?;
        Self::with_pg_client(config, pg_client)
    }

    /// Initializes application state with an existing database client.
    pub fn with_pg_client(
        config: &ServiceConfig,
        pg_client: PgClient,
    ) -> Result<(Self, AuditWorker)> {
        let (audit_handle, audit_worker) = AuditWorker::new(pg_client.clone());

        let service_state = Self {
            pg_client,
            auth_keys: config.load_auth_keys()?,
            verification_cache: VerificationCache::new(),
            audit_handle,
        };

        Ok((service_state, audit_worker))
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(pg_client: PgClient);
impl_di!(auth_keys: AuthKeys);
impl_di!(verification_cache: VerificationCache);
impl_di!(audit_handle: AuditHandle);
