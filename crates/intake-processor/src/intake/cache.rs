use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::domain::ProcessType;
use super::store::{RecordStore, StoreError};

/// Absolute lifetime of a cached process type snapshot.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

struct Snapshot {
    types: Arc<[ProcessType]>,
    expires_at: DateTime<Utc>,
}

/// Read-mostly cache over the store's active process type listing.
///
/// A single snapshot is memoized and replaced wholesale on expiry, so readers
/// observe either the previous complete set or the refreshed one, never a mix.
/// Expiry is absolute, measured from the fetch that filled the entry. A failed
/// refresh propagates to the caller and leaves the cache untouched. Concurrent
/// callers racing an expired entry may each trigger a refresh; the last write
/// wins and every caller still returns a complete snapshot.
pub struct ProcessTypeCache<S> {
    store: Arc<S>,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl<S: RecordStore> ProcessTypeCache<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_ttl(store, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    pub fn with_ttl(store: Arc<S>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the active process types, refreshing from the store when the
    /// snapshot is missing or past its lifetime.
    pub async fn active_process_types(&self) -> Result<Arc<[ProcessType]>, StoreError> {
        self.active_process_types_at(Utc::now()).await
    }

    pub(crate) async fn active_process_types_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Arc<[ProcessType]>, StoreError> {
        {
            let guard = self.snapshot.read().expect("cache lock poisoned");
            if let Some(snapshot) = guard.as_ref() {
                if now < snapshot.expires_at {
                    debug!(
                        count = snapshot.types.len(),
                        "process types served from cache"
                    );
                    return Ok(Arc::clone(&snapshot.types));
                }
            }
        }

        info!("process types not cached or expired, fetching from store");
        let fetched = self.store.list_active_process_types().await?;
        let types: Arc<[ProcessType]> = fetched.into();

        let mut guard = self.snapshot.write().expect("cache lock poisoned");
        *guard = Some(Snapshot {
            types: Arc::clone(&types),
            expires_at: now + self.ttl,
        });
        info!(
            count = types.len(),
            ttl_minutes = self.ttl.num_minutes(),
            "cached process types"
        );

        Ok(types)
    }
}
