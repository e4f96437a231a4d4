//! Upstream search providers.
//!
//! The gateway talks to the upstream through the [`SearchProvider`] trait
//! so tests can swap in doubles with call-count instrumentation. The one
//! production implementation is [`PaapiClient`].

mod paapi;

pub use paapi::{Credentials, DEFAULT_BASE_URL, PaapiClient};

use async_trait::async_trait;

use crate::Result;
use crate::types::upstream::{SearchRequest, SearchResponse};

/// Items requested per upstream call.
pub const DEFAULT_ITEM_COUNT: u32 = 10;

/// Resource fields requested from the upstream — the minimum the frontend
/// cards need.
pub const SEARCH_RESOURCES: &[&str] = &[
    "Images.Primary.Medium",
    "ItemInfo.Title",
    "Offers.Listings.Price",
    "Offers.Listings.Savings",
];

/// A search upstream.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Execute one search call.
    ///
    /// Errors are already classified
    /// ([`RateLimited`](crate::ChineurError::RateLimited),
    /// [`AuthenticationFailed`](crate::ChineurError::AuthenticationFailed),
    /// [`Timeout`](crate::ChineurError::Timeout), ...) — the gateway
    /// propagates them untouched and never retries.
    async fn search_items(&self, request: &SearchRequest) -> Result<SearchResponse>;
}
