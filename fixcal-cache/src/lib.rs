//! Deduplicating TTL memoization cache.
//!
//! [`MemoCache`] maps keys to the result of a [`Compute`](fixcal_core::Compute)
//! implementation. Concurrent requests for one key share a single computation,
//! unrelated keys run in parallel, and every result (success or error) is
//! evicted a fixed TTL after it was published.

mod cache;
mod expiry;
mod gate;

pub use cache::{CacheConfig, CacheStats, MemoCache};
pub use expiry::{ExpiryHandle, ExpiryScheduler};
pub use gate::{ready_gate, Publisher, ReadyGate};
