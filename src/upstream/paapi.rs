//! Product Advertising API client.
//!
//! Speaks the PAAPI `SearchItems` operation: a JSON POST carrying the
//! search parameters plus partner tag and marketplace, credentials in
//! headers. Request signing is the SDK's concern in the original service
//! and stays outside this contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::SearchProvider;
use crate::types::upstream::{SearchRequest, SearchResponse};
use crate::{ChineurError, Result};

/// Default base URL for the French marketplace endpoint.
pub const DEFAULT_BASE_URL: &str = "https://webservices.amazon.fr";

/// Default timeout on upstream calls. A hanging upstream call would
/// otherwise pin the caller indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Partner credentials for the upstream API.
///
/// All three are required; the daemon refuses to start without them.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub partner_tag: String,
}

/// Client for the Product Advertising API `SearchItems` operation.
#[derive(Clone)]
pub struct PaapiClient {
    credentials: Credentials,
    marketplace: String,
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl PaapiClient {
    /// Create a new client against the production endpoint.
    pub fn new(credentials: Credentials, marketplace: impl Into<String>) -> Self {
        Self::with_base_url(credentials, marketplace, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and timeout (for testing
    /// with wiremock).
    pub fn with_base_url(
        credentials: Credentials,
        marketplace: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            credentials,
            marketplace: marketplace.into(),
            http,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Execute a `SearchItems` call.
    pub async fn search_items(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = format!("{}/paapi5/searchitems", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(
                "X-Amz-Target",
                "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.SearchItems",
            )
            .header("X-Access-Key", &self.credentials.access_key)
            .header("X-Secret-Key", &self.credentials.secret_key)
            .json(&SearchItemsBody {
                request,
                partner_tag: &self.credentials.partner_tag,
                partner_type: "Associates",
                marketplace: &self.marketplace,
            })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(self.classify_failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ChineurError::Http(e.to_string()))
    }

    fn map_send_error(&self, err: reqwest::Error) -> ChineurError {
        if err.is_timeout() {
            ChineurError::Timeout(self.timeout)
        } else {
            ChineurError::Http(err.to_string())
        }
    }

    /// Map a non-success response to the error taxonomy.
    ///
    /// Consumes the response: 400s are told apart by the upstream error
    /// body (invalid vs. missing parameter).
    async fn classify_failure(&self, response: reqwest::Response) -> ChineurError {
        let status = response.status().as_u16();

        match status {
            401 | 403 => ChineurError::AuthenticationFailed,
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                ChineurError::RateLimited { retry_after }
            }
            400 => {
                let body: ErrorResponse = response.json().await.unwrap_or_default();
                let Some(first) = body.errors.into_iter().next() else {
                    return ChineurError::InvalidParameter("unspecified".into());
                };
                if first.code.contains("TooManyRequests") {
                    ChineurError::RateLimited { retry_after: None }
                } else if first.code.contains("Missing") {
                    ChineurError::MissingParameter(first.message)
                } else {
                    ChineurError::InvalidParameter(first.message)
                }
            }
            code => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "upstream returned an unreadable body".into());
                ChineurError::Upstream {
                    status: code,
                    message,
                }
            }
        }
    }
}

#[async_trait]
impl SearchProvider for PaapiClient {
    fn name(&self) -> &str {
        "paapi"
    }

    async fn search_items(&self, request: &SearchRequest) -> Result<SearchResponse> {
        // Delegate to the existing method
        PaapiClient::search_items(self, request).await
    }
}

/// Wire body: the logical request flattened together with the partner
/// fields the API wants in every call.
#[derive(Serialize)]
struct SearchItemsBody<'a> {
    #[serde(flatten)]
    request: &'a SearchRequest,
    #[serde(rename = "PartnerTag")]
    partner_tag: &'a str,
    #[serde(rename = "PartnerType")]
    partner_type: &'a str,
    #[serde(rename = "Marketplace")]
    marketplace: &'a str,
}

#[derive(Default, Deserialize)]
struct ErrorResponse {
    #[serde(rename = "Errors", default)]
    errors: Vec<UpstreamFault>,
}

#[derive(Default, Deserialize)]
struct UpstreamFault {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}
