//! Deduplicating memoization cache with per-entry TTL.
//!
//! The entry map sits behind a single mutex that is held only for lookups,
//! inserts and removals. Computations run in their own tasks, outside the
//! lock, and publish through a one-shot [`ReadyGate`]. A published entry is
//! removed by an expiry task `ttl` later, but only if the map still holds that
//! same entry: a newer generation for the key is never evicted by an old
//! timer.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use fixcal_core::constants::DEFAULT_CACHE_TTL_SECS;
use fixcal_core::Compute;

use crate::expiry::{ExpiryHandle, ExpiryScheduler};
use crate::gate::{ready_gate, Publisher, ReadyGate};

type Outcome<C> = Result<<C as Compute>::Value, <C as Compute>::Error>;
type EntryMap<C> = HashMap<<C as Compute>::Key, Arc<Entry<C>>>;

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a published result stays cached
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    /// Config with a TTL of `hours`. `None` if that many seconds overflow `u64`.
    pub fn from_hours(hours: u64) -> Option<Self> {
        hours
            .checked_mul(60 * 60)
            .map(|ttl_seconds| Self { ttl_seconds })
    }

    /// TTL as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// One generation of a key: created computing, published once, then removed.
struct Entry<C: Compute> {
    gate: ReadyGate<Outcome<C>>,
    ready_at: Mutex<Option<Instant>>,
    expiry: Mutex<Option<ExpiryHandle>>,
}

impl<C: Compute> Entry<C> {
    fn new(gate: ReadyGate<Outcome<C>>) -> Self {
        Self {
            gate,
            ready_at: Mutex::new(None),
            expiry: Mutex::new(None),
        }
    }

    fn cancel_expiry(&self) {
        if let Some(handle) = self.expiry.lock().take() {
            handle.cancel();
        }
    }
}

struct Inner<C: Compute> {
    compute: C,
    entries: Mutex<EntryMap<C>>,
    expiry: ExpiryScheduler,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Concurrency-safe memoization of a [`Compute`] implementation.
///
/// - Concurrent [`get`](Self::get) calls for one key run the computation once
///   and all receive the same result.
/// - Different keys never wait on each other.
/// - Errors are cached exactly like values and are not retried until the
///   entry expires or is invalidated.
/// - A computation always runs to completion, even if every caller that
///   asked for it has gone away.
///
/// Cloning is cheap and yields a handle to the same cache.
pub struct MemoCache<C: Compute> {
    inner: Arc<Inner<C>>,
}

impl<C: Compute> Clone for MemoCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

enum Lookup<C: Compute> {
    Hit(Arc<Entry<C>>),
    Miss(Arc<Entry<C>>, Publisher<Outcome<C>>),
}

impl<C> MemoCache<C>
where
    C: Compute,
    C::Key: Eq + Hash + Clone + Debug,
    C::Value: Clone + Sync,
    C::Error: Clone + Debug + Sync,
{
    /// Creates a cache whose entries live for `ttl` after publication.
    pub fn new(compute: C, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                compute,
                entries: Mutex::new(HashMap::new()),
                expiry: ExpiryScheduler::new(),
                ttl,
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Creates a cache from a [`CacheConfig`].
    pub fn with_config(compute: C, config: CacheConfig) -> Self {
        Self::new(compute, config.ttl())
    }

    /// Returns the result for `key`, computing it if no entry exists.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if the computation this call waits on panicked. The entry is
    /// removed first, so the next call for the key computes afresh.
    pub async fn get(&self, key: &C::Key) -> Outcome<C> {
        let lookup = {
            let mut entries = self.inner.entries.lock();
            match entries.get(key) {
                Some(entry) => Lookup::Hit(entry.clone()),
                None => {
                    let (publisher, gate) = ready_gate();
                    let entry = Arc::new(Entry::new(gate));
                    entries.insert(key.clone(), entry.clone());
                    Lookup::Miss(entry, publisher)
                }
            }
        };

        let entry = match lookup {
            Lookup::Hit(entry) => {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                debug!(?key, ready = entry.gate.is_ready(), "Cache hit");
                entry
            }
            Lookup::Miss(entry, publisher) => {
                self.inner.misses.fetch_add(1, Ordering::Relaxed);
                debug!(?key, "Cache miss, computing");
                self.spawn_computation(key.clone(), entry.clone(), publisher);
                entry
            }
        };

        match entry.gate.wait().await {
            Some(outcome) => outcome,
            None => panic!("MemoCache: computation for key {key:?} panicked before publishing"),
        }
    }

    /// Returns the published result for `key` without computing or waiting.
    pub fn peek(&self, key: &C::Key) -> Option<Outcome<C>> {
        let entry = self.inner.entries.lock().get(key).cloned()?;
        entry.gate.peek()
    }

    /// Publishes `value` for `key` without running the computation.
    ///
    /// Replaces any current entry, starting a new generation with its own TTL.
    /// Callers already waiting on the replaced entry still receive its result.
    pub fn set(&self, key: C::Key, value: C::Value) {
        let (publisher, gate) = ready_gate();
        let entry = Arc::new(Entry::new(gate));

        let previous = self.inner.entries.lock().insert(key.clone(), entry.clone());
        if let Some(previous) = previous {
            previous.cancel_expiry();
        }

        debug!(?key, "Cache set");
        self.inner.publish(key, entry, publisher, Ok(value));
    }

    /// Removes the entry for `key`. Returns true if one existed.
    ///
    /// The next [`get`](Self::get) computes afresh. An in-flight computation
    /// for the removed entry still completes and delivers to its waiters.
    pub fn invalidate(&self, key: &C::Key) -> bool {
        let removed = self.inner.entries.lock().remove(key);
        match removed {
            Some(entry) => {
                entry.cancel_expiry();
                debug!(?key, "Cache entry invalidated");
                true
            }
            None => false,
        }
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let drained: Vec<_> = self.inner.entries.lock().drain().collect();
        for (_, entry) in &drained {
            entry.cancel_expiry();
        }
        debug!(count = drained.len(), "Cache cleared");
    }

    /// Returns true if an entry (computing or ready) exists for `key`.
    pub fn contains_key(&self, key: &C::Key) -> bool {
        self.inner.entries.lock().contains_key(key)
    }

    /// Returns the number of entries, computing or ready.
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }

    /// TTL applied to every published entry.
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let (total, ready) = {
            let entries = self.inner.entries.lock();
            let ready = entries.values().filter(|e| e.gate.is_ready()).count();
            (entries.len(), ready)
        };

        CacheStats {
            total_entries: total,
            ready_entries: ready,
            computing_entries: total - ready,
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            pending_expiries: self.inner.expiry.pending(),
        }
    }

    /// Cancels all pending expiry timers and waits for them to stop.
    ///
    /// Cached entries stay readable, but nothing expires afterwards.
    pub async fn shutdown(&self) {
        info!(pending = self.inner.expiry.pending(), "Shutting down cache expiry");
        self.inner.expiry.shutdown().await;
    }

    fn spawn_computation(&self, key: C::Key, entry: Arc<Entry<C>>, publisher: Publisher<Outcome<C>>) {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let mut guard = AbandonGuard {
                inner: &inner,
                key: &key,
                entry: &entry,
                publisher: Some(publisher),
            };
            let outcome = inner.compute.compute(&key).await;

            match &outcome {
                Ok(_) => debug!(?key, elapsed = ?started.elapsed(), "Computed"),
                Err(error) => warn!(?key, ?error, "Computation failed, caching error"),
            }
            if let Some(publisher) = guard.publisher.take() {
                inner.publish(key.clone(), entry.clone(), publisher, outcome);
            }
        });
    }
}

impl<C> Inner<C>
where
    C: Compute,
    C::Key: Eq + Hash + Clone + Debug,
    C::Value: Clone + Sync,
    C::Error: Clone + Debug + Sync,
{
    fn publish(
        self: &Arc<Self>,
        key: C::Key,
        entry: Arc<Entry<C>>,
        publisher: Publisher<Outcome<C>>,
        outcome: Outcome<C>,
    ) {
        *entry.ready_at.lock() = Some(Instant::now());
        publisher.publish(outcome);

        // The handle is stored under the map guard, so a concurrent
        // invalidate or set either sees it or keeps the timer from starting.
        let entries = self.entries.lock();
        let is_current = entries
            .get(&key)
            .map_or(false, |current| Arc::ptr_eq(current, &entry));
        if !is_current {
            debug!(?key, "Published generation already replaced, no expiry");
            return;
        }

        let cache = Arc::downgrade(self);
        let target = Arc::downgrade(&entry);
        let handle = self.expiry.schedule(self.ttl, move || expire(cache, key, target));
        *entry.expiry.lock() = Some(handle);
    }

    /// Removes `key` only if it still maps to `entry`.
    fn remove_if_current(&self, key: &C::Key, entry: &Arc<Entry<C>>) -> bool {
        let mut entries = self.entries.lock();
        let is_current = entries
            .get(key)
            .map_or(false, |current| Arc::ptr_eq(current, entry));
        if is_current {
            entries.remove(key);
        }
        is_current
    }
}

fn expire<C>(cache: Weak<Inner<C>>, key: C::Key, entry: Weak<Entry<C>>)
where
    C: Compute,
    C::Key: Eq + Hash + Clone + Debug,
    C::Value: Clone + Sync,
    C::Error: Clone + Debug + Sync,
{
    // Either side gone means the cache was dropped or the entry already left the map.
    let (Some(cache), Some(entry)) = (cache.upgrade(), entry.upgrade()) else {
        return;
    };
    if cache.remove_if_current(&key, &entry) {
        let age = entry.ready_at.lock().map(|at| at.elapsed());
        debug!(?key, ?age, "Cache entry expired");
    }
}

/// Owns the publisher while the computation runs. If the computation unwinds,
/// the entry leaves the map before the gate closes, so no new caller can join
/// a gate that will never fire.
struct AbandonGuard<'a, C>
where
    C: Compute,
    C::Key: Eq + Hash + Clone + Debug,
    C::Value: Clone + Sync,
    C::Error: Clone + Debug + Sync,
{
    inner: &'a Arc<Inner<C>>,
    key: &'a C::Key,
    entry: &'a Arc<Entry<C>>,
    publisher: Option<Publisher<Outcome<C>>>,
}

impl<C> Drop for AbandonGuard<'_, C>
where
    C: Compute,
    C::Key: Eq + Hash + Clone + Debug,
    C::Value: Clone + Sync,
    C::Error: Clone + Debug + Sync,
{
    fn drop(&mut self) {
        if let Some(publisher) = self.publisher.take() {
            warn!(key = ?self.key, "Computation abandoned before publishing");
            self.inner.remove_if_current(self.key, self.entry);
            drop(publisher);
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub ready_entries: usize,
    pub computing_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub pending_expiries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use fixcal_core::ComputeFn;
    use tokio::sync::Notify;
    use tokio::task::JoinSet;
    use tokio::time::{sleep, timeout};

    const TTL: Duration = Duration::from_secs(60);

    /// Compute that counts calls, sleeps `delay`, and answers `"<key>-<call>"`.
    fn counting(
        delay: Duration,
    ) -> (
        Arc<AtomicUsize>,
        impl Compute<Key = String, Value = String, Error = String>,
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let compute = ComputeFn::new({
            let calls = calls.clone();
            move |key: String| {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    sleep(delay).await;
                    Ok::<_, String>(format!("{key}-{call}"))
                }
            }
        });
        (calls, compute)
    }

    /// Like [`counting`], but only the first call is slow; later calls take 1ms.
    fn staged(
        first_delay: Duration,
    ) -> (
        Arc<AtomicUsize>,
        impl Compute<Key = String, Value = String, Error = String>,
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let compute = ComputeFn::new({
            let calls = calls.clone();
            move |key: String| {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                let delay = if call == 1 { first_delay } else { Duration::from_millis(1) };
                async move {
                    sleep(delay).await;
                    Ok::<_, String>(format!("{key}-{call}"))
                }
            }
        });
        (calls, compute)
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_gets_compute_once() {
        let (calls, compute) = counting(Duration::from_millis(100));
        let cache = MemoCache::new(compute, TTL);
        let start = Instant::now();

        let mut tasks = JoinSet::new();
        for _ in 0..5 {
            let cache = cache.clone();
            tasks.spawn(async move { cache.get(&"A".to_string()).await });
        }

        while let Some(result) = tasks.join_next().await {
            assert_eq!(result.unwrap(), Ok("A-1".to_string()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert!(start.elapsed() < Duration::from_millis(200));

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_after_ready_does_not_recompute() {
        let (calls, compute) = counting(Duration::from_millis(10));
        let cache = MemoCache::new(compute, TTL);
        let key = "A".to_string();

        assert_eq!(cache.get(&key).await, Ok("A-1".into()));
        assert_eq!(cache.get(&key).await, Ok("A-1".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.peek(&key), Some(Ok("A-1".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_key_does_not_block_others() {
        let never = Arc::new(Notify::new());
        let compute = ComputeFn::new({
            let never = never.clone();
            move |key: String| {
                let never = never.clone();
                async move {
                    if key == "k1" {
                        never.notified().await;
                    }
                    Ok::<_, String>(key)
                }
            }
        });
        let cache = MemoCache::new(compute, TTL);

        let blocked = tokio::spawn({
            let cache = cache.clone();
            async move { cache.get(&"k1".to_string()).await }
        });
        tokio::task::yield_now().await;

        let other = timeout(Duration::from_secs(1), cache.get(&"k2".to_string())).await;
        assert_eq!(other.unwrap(), Ok("k2".to_string()));
        assert!(!blocked.is_finished());

        let stats = cache.stats();
        assert_eq!(stats.computing_entries, 1);
        assert_eq!(stats.ready_entries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let compute = ComputeFn::new({
            let calls = calls.clone();
            move |_key: String| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<String, _>("404".to_string()) }
            }
        });
        let cache = MemoCache::new(compute, TTL);
        let key = "B".to_string();

        assert_eq!(cache.get(&key).await, Err("404".to_string()));
        assert_eq!(cache.get(&key).await, Err("404".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_triggers_recompute() {
        let (calls, compute) = counting(Duration::ZERO);
        let cache = MemoCache::new(compute, Duration::from_millis(10));
        let key = "C".to_string();

        assert_eq!(cache.get(&key).await, Ok("C-1".into()));
        sleep(Duration::from_millis(20)).await;
        assert!(!cache.contains_key(&key));

        assert_eq!(cache.get(&key).await, Ok("C-2".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_counts_from_publication() {
        let (_, compute) = counting(Duration::from_millis(100));
        let cache = MemoCache::new(compute, Duration::from_millis(50));
        let key = "slow".to_string();

        cache.get(&key).await.unwrap();
        // Computation took longer than the TTL; the entry must still be fresh.
        assert!(cache.contains_key(&key));
        sleep(Duration::from_millis(60)).await;
        assert!(!cache.contains_key(&key));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiter_keeps_its_generation() {
        let (_, compute) = staged(Duration::from_millis(100));
        let cache = MemoCache::new(compute, TTL);
        let key = "k".to_string();

        let first = tokio::spawn({
            let cache = cache.clone();
            let key = key.clone();
            async move { cache.get(&key).await }
        });
        sleep(Duration::from_millis(10)).await;
        let old_waiter = tokio::spawn({
            let cache = cache.clone();
            let key = key.clone();
            async move { cache.get(&key).await }
        });
        sleep(Duration::from_millis(10)).await;

        assert!(cache.invalidate(&key));
        assert_eq!(cache.get(&key).await, Ok("k-2".into()));

        assert_eq!(first.await.unwrap(), Ok("k-1".into()));
        assert_eq!(old_waiter.await.unwrap(), Ok("k-1".into()));
        // The late first-generation publish must not displace generation two.
        assert_eq!(cache.peek(&key), Some(Ok("k-2".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_expiry_keeps_newer_generation() {
        let (calls, compute) = staged(Duration::from_millis(100));
        let cache = MemoCache::new(compute, Duration::from_millis(50));
        let key = "k".to_string();

        let first = tokio::spawn({
            let cache = cache.clone();
            let key = key.clone();
            async move { cache.get(&key).await }
        });
        sleep(Duration::from_millis(10)).await;
        cache.invalidate(&key);

        // Generation one publishes at 100ms, outside the map, and arms no timer.
        assert_eq!(first.await.unwrap(), Ok("k-1".into()));
        sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get(&key).await, Ok("k-2".into()));

        // Generation two was published just after 120ms and lives until about 171ms.
        sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.peek(&key), Some(Ok("k-2".into())));
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        sleep(Duration::from_millis(20)).await;
        assert!(!cache.contains_key(&key));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_publishes_without_compute() {
        let (calls, compute) = counting(Duration::ZERO);
        let cache = MemoCache::new(compute, Duration::from_millis(50));
        let key = "D".to_string();

        cache.set(key.clone(), "manual".into());
        assert_eq!(cache.get(&key).await, Ok("manual".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get(&key).await, Ok("D-1".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_starts_new_ttl() {
        let (_, compute) = counting(Duration::ZERO);
        let cache = MemoCache::new(compute, Duration::from_millis(50));
        let key = "E".to_string();

        cache.get(&key).await.unwrap();
        sleep(Duration::from_millis(40)).await;
        cache.set(key.clone(), "fresh".into());

        sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.peek(&key), Some(Ok("fresh".into())));
        sleep(Duration::from_millis(40)).await;
        assert!(cache.peek(&key).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_giving_up_does_not_abort_computation() {
        let (calls, compute) = counting(Duration::from_millis(100));
        let cache = MemoCache::new(compute, TTL);
        let key = "F".to_string();

        let gave_up = timeout(Duration::from_millis(10), cache.get(&key)).await;
        assert!(gave_up.is_err());

        sleep(Duration::from_millis(100)).await;
        assert_eq!(cache.peek(&key), Some(Ok("F-1".into())));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replaced_computation_arms_no_expiry() {
        let (_, compute) = counting(Duration::from_millis(50));
        let cache = MemoCache::new(compute, TTL);

        let spawn_get = |key: &str| {
            let cache = cache.clone();
            let key = key.to_string();
            tokio::spawn(async move { cache.get(&key).await })
        };
        let invalidated = spawn_get("F");
        let replaced = spawn_get("G");

        sleep(Duration::from_millis(10)).await;
        assert!(cache.invalidate(&"F".to_string()));
        cache.set("G".to_string(), "manual".into());

        assert_eq!(invalidated.await.unwrap(), Ok("F-1".into()));
        assert_eq!(replaced.await.unwrap(), Ok("G-2".into()));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 1);
        // Only the generation installed by `set` has a timer.
        assert_eq!(stats.pending_expiries, 1);
        assert_eq!(cache.peek(&"G".to_string()), Some(Ok("manual".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_and_clear() {
        let (calls, compute) = counting(Duration::ZERO);
        let cache = MemoCache::new(compute, TTL);

        assert!(!cache.invalidate(&"missing".to_string()));
        cache.get(&"a".to_string()).await.unwrap();
        cache.get(&"b".to_string()).await.unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        cache.get(&"a".to_string()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_computation_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let compute = ComputeFn::new({
            let calls = calls.clone();
            move |key: String| {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if call == 1 {
                        panic!("upstream parser bug");
                    }
                    Ok::<_, String>(key)
                }
            }
        });
        let cache = MemoCache::new(compute, TTL);
        let key = "G".to_string();

        let first = tokio::spawn({
            let cache = cache.clone();
            let key = key.clone();
            async move { cache.get(&key).await }
        });
        assert!(first.await.is_err());
        assert!(!cache.contains_key(&key));

        assert_eq!(cache.get(&key).await, Ok("G".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_expiry() {
        let (_, compute) = counting(Duration::ZERO);
        let cache = MemoCache::new(compute, Duration::from_millis(10));
        let key = "H".to_string();

        cache.get(&key).await.unwrap();
        assert_eq!(cache.stats().pending_expiries, 1);
        cache.shutdown().await;
        assert_eq!(cache.stats().pending_expiries, 0);

        sleep(Duration::from_millis(20)).await;
        assert!(cache.contains_key(&key));
    }

    #[test]
    fn test_default_config_is_twelve_hours() {
        assert_eq!(CacheConfig::default().ttl(), Duration::from_secs(12 * 60 * 60));
    }

    #[test]
    fn test_config_from_hours() {
        assert_eq!(CacheConfig::from_hours(2).unwrap().ttl_seconds, 7200);
        assert!(CacheConfig::from_hours(u64::MAX / 3600).is_some());
        assert!(CacheConfig::from_hours(u64::MAX / 3600 + 1).is_none());
    }
}
