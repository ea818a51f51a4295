use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug)]
struct CachedEntry<T> {
    value: Arc<T>,
    built_at: DateTime<Utc>,
}

/// Single-slot cache whose entry expires `ttl` after it was built.
///
/// The slot stays locked while a value is rebuilt, so concurrent misses wait for the first
/// rebuild and then see its result instead of rebuilding again.
pub struct SnapshotCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: tokio::sync::Mutex<Option<CachedEntry<T>>>,
}

impl<T> SnapshotCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slot: tokio::sync::Mutex::new(None),
        }
    }

    fn is_fresh(&self, built_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match (now - built_at).to_std() {
            Ok(age) => age < self.ttl,
            // Built "in the future" (clock stepped back): keep it.
            Err(_) => true,
        }
    }

    /// A failed build leaves the previous entry in place and returns the error.
    pub async fn get_or_build<F, Fut>(&self, force_refresh: bool, build: F) -> anyhow::Result<Arc<T>>
    where
        F: FnOnce(DateTime<Utc>) -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut guard = self.slot.lock().await;
        let now = self.clock.now();

        if !force_refresh {
            if let Some(entry) = guard.as_ref() {
                if self.is_fresh(entry.built_at, now) {
                    tracing::debug!(built_at = %entry.built_at, "snapshot cache hit");
                    return Ok(entry.value.clone());
                }
            }
        }

        tracing::debug!(force_refresh, "snapshot cache miss; rebuilding");
        let value = Arc::new(build(now).await?);
        *guard = Some(CachedEntry {
            value: value.clone(),
            built_at: now,
        });
        Ok(value)
    }

    pub async fn built_at(&self) -> Option<DateTime<Utc>> {
        self.slot.lock().await.as_ref().map(|e| e.built_at)
    }
}

#[cfg(test)]
pub(crate) mod test_clock {
    use super::*;
    use std::sync::Mutex;

    pub struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self(Mutex::new(start))
        }

        pub fn advance(&self, by: chrono::Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }
}
