//! Short-lived cache for formatted deal pages.
//!
//! [`DealCache`] sits in [`DealGateway`](crate::DealGateway), before the
//! throttle and the upstream call. A fresh hit bypasses both entirely and
//! returns the stored [`DealsPage`] as-is, so repeated identical queries
//! within the TTL produce byte-identical responses without touching the
//! upstream.
//!
//! Entries are keyed by [`Query::cache_key`](crate::Query::cache_key) and
//! replaced wholesale on refresh, never mutated in place. Staleness is
//! handled by moka's TTL: an entry past the TTL is simply a miss. Two
//! concurrent misses for the same key may both call upstream — last writer
//! wins, which is fine since both wrote the same answer modulo upstream
//! drift.

use std::time::Duration;

use moka::future::Cache;

use crate::telemetry;
use crate::types::{DealsPage, Query};

/// Configuration for the deal-page cache.
///
/// ```rust
/// # use chineur::cache::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached pages. Default: 1,000.
    pub max_entries: u64,
    /// Time-to-live for cached pages. Default: 5 minutes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached pages.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached pages.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// In-memory cache of formatted deal pages.
///
/// Uses moka's async-friendly LRU + TTL cache, bounded so that a long tail
/// of one-off keywords cannot grow memory without limit.
pub struct DealCache {
    cache: Cache<String, DealsPage>,
}

impl DealCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Look up the cached page for a query.
    ///
    /// Returns `None` on miss or stale entry. Emits cache hit/miss metrics.
    pub async fn get(&self, query: &Query) -> Option<DealsPage> {
        match self.cache.get(&query.cache_key()).await {
            Some(page) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(page)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Store the page for a query, overwriting any prior entry.
    pub async fn insert(&self, query: &Query, page: DealsPage) {
        self.cache.insert(query.cache_key(), page).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(current_page: u32) -> DealsPage {
        DealsPage {
            items: vec![],
            current_page,
            total_pages: crate::MAX_PAGES,
        }
    }

    fn query(keyword: &str) -> Query {
        Query::from_params(Some(keyword), None, None).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1_000);
        assert_eq!(config.ttl, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = DealCache::new(&CacheConfig::default());
        let q = query("laptop");

        assert!(cache.get(&q).await.is_none());
        cache.insert(&q, page(1)).await;
        assert_eq!(cache.get(&q).await, Some(page(1)));
    }

    #[tokio::test]
    async fn keyword_case_shares_entry() {
        let cache = DealCache::new(&CacheConfig::default());
        cache.insert(&query("Bons Plans"), page(1)).await;
        assert!(cache.get(&query("bons plans")).await.is_some());
    }

    #[tokio::test]
    async fn insert_overwrites_prior_entry() {
        let cache = DealCache::new(&CacheConfig::default());
        let q = query("laptop");
        cache.insert(&q, page(1)).await;
        cache.insert(&q, page(2)).await;
        assert_eq!(cache.get(&q).await, Some(page(2)));
    }

    #[tokio::test]
    async fn entry_expires_after_ttl() {
        let config = CacheConfig::new().ttl(Duration::from_millis(50));
        let cache = DealCache::new(&config);
        let q = query("laptop");

        cache.insert(&q, page(1)).await;
        assert!(cache.get(&q).await.is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(cache.get(&q).await.is_none());
    }
}
