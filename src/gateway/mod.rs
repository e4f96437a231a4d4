//! Gateway implementations

mod builder;

pub use builder::{Chineur, ChineurBuilder};

use std::sync::Arc;
use std::time::Instant;

use crate::cache::DealCache;
use crate::filter;
use crate::telemetry;
use crate::throttle::Throttle;
use crate::types::upstream::SearchRequest;
use crate::types::{DealsPage, MAX_PAGES, Query};
use crate::upstream::{DEFAULT_ITEM_COUNT, SEARCH_RESOURCES, SearchProvider};
use crate::Result;

/// The deal-search gateway: cache in front, throttle and upstream behind.
///
/// One instance is built at startup and shared across requests; the cache
/// map and the throttle's last-call instant are the only process-wide
/// mutable state.
pub struct DealGateway {
    provider: Arc<dyn SearchProvider>,
    cache: DealCache,
    throttle: Throttle,
}

impl DealGateway {
    pub(crate) fn new(provider: Arc<dyn SearchProvider>, cache: DealCache, throttle: Throttle) -> Self {
        Self {
            provider,
            cache,
            throttle,
        }
    }

    /// Resolve a validated query to a page of deals.
    ///
    /// Fresh cache hits return immediately without waiting out the
    /// throttle. On a miss the upstream is called (spaced by the
    /// throttle), the items are run through the discount filter, and the
    /// formatted page is stored before being returned. Upstream failures
    /// propagate as-is and cache nothing — there is no automatic retry.
    pub async fn search_deals(&self, query: &Query) -> Result<DealsPage> {
        if let Some(page) = self.cache.get(query).await {
            tracing::debug!(key = %query.cache_key(), "serving deals from cache");
            return Ok(page);
        }

        self.throttle.acquire().await;

        let request = SearchRequest {
            keywords: query.keyword().to_string(),
            search_index: query.search_index().to_string(),
            item_count: DEFAULT_ITEM_COUNT,
            item_page: query.page(),
            resources: SEARCH_RESOURCES.iter().map(|r| r.to_string()).collect(),
        };

        let started = Instant::now();
        let response = match self.provider.search_items(&request).await {
            Ok(response) => {
                metrics::counter!(telemetry::UPSTREAM_CALLS_TOTAL, "status" => "ok").increment(1);
                response
            }
            Err(err) => {
                metrics::counter!(telemetry::UPSTREAM_CALLS_TOTAL, "status" => "error")
                    .increment(1);
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %err,
                    keyword = query.keyword(),
                    "upstream search failed"
                );
                return Err(err);
            }
        };

        let items = response.into_items();
        let total = items.len();
        let deals = filter::filter_deals(items);
        tracing::info!(
            provider = self.provider.name(),
            keyword = query.keyword(),
            page = query.page(),
            upstream_items = total,
            deals = deals.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream search completed"
        );

        let page = DealsPage {
            items: deals,
            current_page: query.page(),
            total_pages: MAX_PAGES,
        };

        self.cache.insert(query, page.clone()).await;
        Ok(page)
    }
}
