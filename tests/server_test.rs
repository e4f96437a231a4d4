//! End-to-end tests over the HTTP surface: real listener, real client,
//! stubbed upstream.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chineur::types::upstream::{SearchRequest, SearchResponse};
use chineur::{Chineur, DealGateway, Result, SearchProvider, server};

/// Provider that echoes the requested page into a single always-kept deal,
/// so tests can observe what the validator produced.
struct EchoProvider;

#[async_trait]
impl SearchProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn search_items(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let body = serde_json::json!({
            "SearchResult": {"Items": [{
                "ItemInfo": {"Title": {"DisplayValue": format!(
                    "{} (page {}, index {})",
                    request.keywords, request.item_page, request.search_index
                )}},
                "Offers": {"Listings": [{
                    "Price": {"Amount": 50.0, "DisplayAmount": "50,00 €"},
                    "Savings": {"Amount": 50.0}
                }]}
            }]}
        });
        Ok(serde_json::from_value(body)?)
    }
}

/// Spawn the server on an ephemeral port, returning its address and the
/// token that stops it.
async fn spawn_server(gateway: DealGateway) -> (SocketAddr, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    tokio::spawn(async move {
        server::serve_on(listener, Arc::new(gateway), token).await;
    });
    (addr, shutdown)
}

fn echo_gateway() -> DealGateway {
    Chineur::builder()
        .provider(Arc::new(EchoProvider))
        .min_call_interval(Duration::ZERO)
        .build()
        .unwrap()
}

#[tokio::test]
async fn ping_returns_pong() {
    let (addr, shutdown) = spawn_server(echo_gateway()).await;

    let response = reqwest::get(format!("http://{addr}/ping")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "pong");

    shutdown.cancel();
}

#[tokio::test]
async fn search_returns_filtered_page() {
    let (addr, shutdown) = spawn_server(echo_gateway()).await;

    let body: serde_json::Value =
        reqwest::get(format!("http://{addr}/api/amazon?keyword=laptop&category=tech&page=2"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["totalPages"], 10);
    assert_eq!(
        body["items"][0]["title"],
        "laptop (page 2, index Electronics)"
    );

    shutdown.cancel();
}

#[tokio::test]
async fn absent_parameters_use_defaults() {
    let (addr, shutdown) = spawn_server(echo_gateway()).await;

    let body: serde_json::Value = reqwest::get(format!("http://{addr}/api/amazon"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["items"][0]["title"], "bons plans (page 1, index All)");

    shutdown.cancel();
}

#[tokio::test]
async fn out_of_range_pages_are_clamped() {
    let (addr, shutdown) = spawn_server(echo_gateway()).await;

    for (raw, expected) in [("0", 1), ("-5", 1), ("999", 10), ("abc", 1)] {
        let body: serde_json::Value =
            reqwest::get(format!("http://{addr}/api/amazon?page={raw}"))
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
        assert_eq!(body["currentPage"], expected, "page {raw:?}");
    }

    shutdown.cancel();
}

#[tokio::test]
async fn invalid_category_is_rejected_in_french() {
    let (addr, shutdown) = spawn_server(echo_gateway()).await;

    let response = reqwest::get(format!("http://{addr}/api/amazon?category=invalid123"))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "Catégorie non valide"}));

    shutdown.cancel();
}

#[tokio::test]
async fn unknown_route_is_404_json() {
    let (addr, shutdown) = spawn_server(echo_gateway()).await;

    let response = reqwest::get(format!("http://{addr}/api/nope")).await.unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    shutdown.cancel();
}

#[tokio::test]
async fn upstream_rate_limit_surfaces_as_429() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/paapi5/searchitems"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let gateway = Chineur::builder()
        .credentials(chineur::Credentials {
            access_key: "k".into(),
            secret_key: "s".into(),
            partner_tag: "t".into(),
        })
        .base_url(mock_server.uri())
        .min_call_interval(Duration::ZERO)
        .build()
        .unwrap();
    let (addr, shutdown) = spawn_server(gateway).await;

    let response = reqwest::get(format!("http://{addr}/api/amazon?keyword=laptop"))
        .await
        .unwrap();
    assert_eq!(response.status(), 429);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());

    shutdown.cancel();
}

/// Full path through the real upstream client: stubbed PAAPI returns three
/// items, two of which are ≥ 5% discounted.
#[tokio::test]
async fn end_to_end_against_stubbed_upstream() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/paapi5/searchitems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "SearchResult": {"Items": [
                {
                    "ItemInfo": {"Title": {"DisplayValue": "Bon plan A"}},
                    "Offers": {"Listings": [{
                        "Price": {"Amount": 80.0, "DisplayAmount": "80,00 €"},
                        "Savings": {"Amount": 20.0}
                    }]}
                },
                {
                    "ItemInfo": {"Title": {"DisplayValue": "Plein tarif"}},
                    "Offers": {"Listings": [{
                        "Price": {"Amount": 100.0, "DisplayAmount": "100,00 €"}
                    }]}
                },
                {
                    "ItemInfo": {"Title": {"DisplayValue": "Bon plan B"}},
                    "Offers": {"Listings": [{
                        "Price": {"Amount": 95.0, "DisplayAmount": "95,00 €"},
                        "Savings": {"Amount": 5.0}
                    }]}
                }
            ]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = Chineur::builder()
        .credentials(chineur::Credentials {
            access_key: "k".into(),
            secret_key: "s".into(),
            partner_tag: "t".into(),
        })
        .base_url(mock_server.uri())
        .min_call_interval(Duration::ZERO)
        .build()
        .unwrap();
    let (addr, shutdown) = spawn_server(gateway).await;

    let body: serde_json::Value =
        reqwest::get(format!("http://{addr}/api/amazon?keyword=laptop&category=tech&page=2"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["totalPages"], 10);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Bon plan A");
    assert_eq!(items[1]["title"], "Bon plan B");

    shutdown.cancel();
}
