//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheConfig, DealCache};
use crate::throttle::{DEFAULT_MIN_INTERVAL, Throttle};
use crate::upstream::{Credentials, PaapiClient, SearchProvider};
use crate::{ChineurError, Result};

use super::DealGateway;

/// Main entry point for creating gateway instances.
pub struct Chineur;

impl Chineur {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> ChineurBuilder {
        ChineurBuilder::new()
    }
}

/// Builder for configuring gateway instances.
pub struct ChineurBuilder {
    credentials: Option<Credentials>,
    marketplace: String,
    base_url: Option<String>,
    cache: CacheConfig,
    min_call_interval: Duration,
    upstream_timeout: Duration,
    provider: Option<Arc<dyn SearchProvider>>,
}

impl ChineurBuilder {
    pub fn new() -> Self {
        Self {
            credentials: None,
            marketplace: "www.amazon.fr".to_string(),
            base_url: None,
            cache: CacheConfig::default(),
            min_call_interval: DEFAULT_MIN_INTERVAL,
            upstream_timeout: Duration::from_secs(10),
            provider: None,
        }
    }

    /// Set the partner credentials for the production upstream.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the marketplace (default: `www.amazon.fr`).
    pub fn marketplace(mut self, marketplace: impl Into<String>) -> Self {
        self.marketplace = marketplace.into();
        self
    }

    /// Point the upstream client at a custom base URL (wiremock tests,
    /// regional endpoints).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Configure the response cache.
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Set the minimum spacing between upstream call initiations.
    pub fn min_call_interval(mut self, interval: Duration) -> Self {
        self.min_call_interval = interval;
        self
    }

    /// Set the timeout on upstream calls.
    pub fn upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Inject a custom search provider, bypassing the PAAPI client.
    /// Intended for tests.
    pub fn provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the gateway.
    ///
    /// Fails with [`ChineurError::Configuration`] when neither credentials
    /// nor a custom provider were supplied.
    pub fn build(self) -> Result<DealGateway> {
        let provider: Arc<dyn SearchProvider> = match (self.provider, self.credentials) {
            (Some(provider), _) => provider,
            (None, Some(credentials)) => {
                let base_url = self
                    .base_url
                    .unwrap_or_else(|| crate::upstream::DEFAULT_BASE_URL.to_string());
                Arc::new(PaapiClient::with_base_url(
                    credentials,
                    self.marketplace,
                    base_url,
                    self.upstream_timeout,
                ))
            }
            (None, None) => {
                return Err(ChineurError::Configuration(
                    "Amazon credentials are required (access key, secret key, partner tag)"
                        .to_string(),
                ));
            }
        };

        Ok(DealGateway::new(
            provider,
            DealCache::new(&self.cache),
            Throttle::new(self.min_call_interval),
        ))
    }
}

impl Default for ChineurBuilder {
    fn default() -> Self {
        Self::new()
    }
}
