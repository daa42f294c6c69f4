//! Single-slot time-boxed cache for upstream snapshots.
//!
//! A snapshot younger than the TTL is served without touching the upstream.
//! Otherwise the refresh runs; on success it replaces the slot, on failure
//! the last good snapshot is served no matter how old it is. The error only
//! reaches the caller when nothing has ever been cached.
//!
//! The slot lock is never held across the refresh, so two concurrent misses
//! may both reach the upstream. The later write wins.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// How a value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Served from the slot within the TTL.
    Fresh,
    /// Fetched from the upstream during this call.
    Refreshed,
    /// The refresh failed; served an expired snapshot instead.
    Stale,
}

/// Value returned by [`TimeBoxedCache::get_or_refresh`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
    pub freshness: Freshness,
}

#[derive(Debug, Clone)]
struct Snapshot<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

/// Time-boxed cache holding at most one value.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use command_center::domain::{Freshness, TimeBoxedCache};
/// use mockable::DefaultClock;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let cache = TimeBoxedCache::new(Duration::from_secs(300), Arc::new(DefaultClock));
/// let first = cache
///     .get_or_refresh(|| async { Ok::<_, std::io::Error>(7_u32) })
///     .await
///     .expect("refresh succeeds");
/// assert_eq!(first.freshness, Freshness::Refreshed);
/// # });
/// ```
pub struct TimeBoxedCache<T> {
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<Snapshot<T>>>,
}

impl<T> TimeBoxedCache<T>
where
    T: Clone,
{
    /// Create an empty cache. A zero `ttl` refreshes on every call.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Snapshot<T>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fresh(&self, now: DateTime<Utc>) -> Option<Snapshot<T>> {
        self.lock()
            .as_ref()
            .filter(|snapshot| now.signed_duration_since(snapshot.fetched_at) < self.ttl)
            .cloned()
    }

    /// Serve the cached value or refresh it through `refresh`.
    ///
    /// # Errors
    /// Returns the refresh error only when no snapshot has ever been stored.
    pub async fn get_or_refresh<F, Fut, E>(&self, refresh: F) -> Result<Cached<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let now = self.clock.utc();
        if let Some(snapshot) = self.fresh(now) {
            return Ok(Cached {
                value: snapshot.value,
                fetched_at: snapshot.fetched_at,
                freshness: Freshness::Fresh,
            });
        }

        match refresh().await {
            Ok(value) => {
                let fetched_at = self.clock.utc();
                *self.lock() = Some(Snapshot {
                    value: value.clone(),
                    fetched_at,
                });
                Ok(Cached {
                    value,
                    fetched_at,
                    freshness: Freshness::Refreshed,
                })
            }
            Err(err) => match self.lock().clone() {
                Some(snapshot) => Ok(Cached {
                    value: snapshot.value,
                    fetched_at: snapshot.fetched_at,
                    freshness: Freshness::Stale,
                }),
                None => Err(err),
            },
        }
    }
}
