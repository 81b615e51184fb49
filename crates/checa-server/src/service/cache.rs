//! In-process cache for per-booking verification state.
//!
//! The gate state is recomputed from the latest documents on every miss.
//! Entries are invalidated whenever a document of the booking changes and
//! additionally expire after a short TTL, so a missed invalidation (e.g. a
//! write from another replica) self-heals quickly.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use checa_postgres::types::DocumentVerificationState;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Tracing target for cache operations.
const TRACING_TARGET: &str = "checa_server::cache";

/// Default entry lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Shared cache of computed verification states, keyed by booking.
#[derive(Debug, Clone)]
pub struct VerificationCache {
    entries: Arc<RwLock<HashMap<Uuid, CacheEntry>>>,
    ttl: Duration,
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    state: DocumentVerificationState,
    inserted_at: Instant,
}

impl VerificationCache {
    /// Creates a cache with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the cached state for a booking, if fresh.
    pub async fn get(&self, booking_id: Uuid) -> Option<DocumentVerificationState> {
        let entries = self.entries.read().await;
        let entry = entries.get(&booking_id)?;

        if entry.inserted_at.elapsed() > self.ttl {
            return None;
        }

        Some(entry.state)
    }

    /// Stores the freshly computed state for a booking.
    pub async fn insert(&self, booking_id: Uuid, state: DocumentVerificationState) {
        let mut entries = self.entries.write().await;
        entries.insert(
            booking_id,
            CacheEntry {
                state,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drops the cached state for a booking after a document mutation.
    pub async fn invalidate(&self, booking_id: Uuid) {
        let mut entries = self.entries.write().await;
        if entries.remove(&booking_id).is_some() {
            tracing::debug!(
                target: TRACING_TARGET,
                booking_id = %booking_id,
                "Invalidated cached verification state"
            );
        }
    }
}

impl Default for VerificationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use checa_postgres::types::VerificationStatus;

    use super::*;

    fn state() -> DocumentVerificationState {
        DocumentVerificationState::new(
            Some(VerificationStatus::Verified),
            None,
            Some(VerificationStatus::Verified),
            false,
        )
    }

    #[tokio::test]
    async fn insert_get_invalidate() {
        let cache = VerificationCache::new();
        let booking_id = Uuid::new_v4();

        assert!(cache.get(booking_id).await.is_none());

        cache.insert(booking_id, state()).await;
        assert_eq!(cache.get(booking_id).await, Some(state()));

        cache.invalidate(booking_id).await;
        assert!(cache.get(booking_id).await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_miss() {
        let cache = VerificationCache::with_ttl(Duration::ZERO);
        let booking_id = Uuid::new_v4();

        cache.insert(booking_id, state()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(cache.get(booking_id).await.is_none());
    }
}
