//! Common traits for fixcal.
//!
//! [`Compute`] is the only thing the cache knows about the work it memoizes.
//! The scraper implements it for real traffic; tests plug in closures through
//! [`ComputeFn`].

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;

/// A possibly slow, possibly failing computation keyed by `Key`.
///
/// Implementations should be idempotent with respect to external systems:
/// the cache runs at most one computation per key at a time, and a computation
/// that has started always runs to completion.
#[async_trait]
pub trait Compute: Send + Sync + 'static {
    /// Lookup key.
    type Key: Send + Sync + 'static;
    /// Successful result.
    type Value: Send + 'static;
    /// Failed result.
    type Error: Send + 'static;

    /// Computes the value for `key`.
    async fn compute(&self, key: &Self::Key) -> Result<Self::Value, Self::Error>;
}

/// Adapts an async closure into a [`Compute`] implementation.
///
/// The closure receives an owned clone of the key.
pub struct ComputeFn<F, K> {
    f: F,
    _key: PhantomData<fn(K)>,
}

impl<F, K> ComputeFn<F, K> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self { f, _key: PhantomData }
    }
}

impl<F, K> fmt::Debug for ComputeFn<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut, K, V, E> Compute for ComputeFn<F, K>
where
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, E>> + Send + 'static,
    K: Clone + Send + Sync + 'static,
    V: Send + 'static,
    E: Send + 'static,
{
    type Key = K;
    type Value = V;
    type Error = E;

    async fn compute(&self, key: &K) -> Result<V, E> {
        (self.f)(key.clone()).await
    }
}
