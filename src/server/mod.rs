//! HTTP surface.
//!
//! A small hyper HTTP/1 server exposing:
//!
//! - `GET /ping` — health check, responds `pong`.
//! - `GET /api/amazon?keyword=&category=&page=` — the deals endpoint.
//!
//! Every failure is converted to a JSON error body at this boundary;
//! nothing here crashes the process. Static files, CORS, and the SPA
//! fallback are a reverse proxy's job in deployment and are not served
//! here.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::gateway::DealGateway;
use crate::telemetry;
use crate::types::Query;
use crate::{ChineurError, Result};

/// Bind and serve until the shutdown token fires.
pub async fn serve(
    addr: SocketAddr,
    gateway: Arc<DealGateway>,
    shutdown: CancellationToken,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ChineurError::Configuration(format!("cannot bind {addr}: {e}")))?;
    serve_on(listener, gateway, shutdown).await;
    Ok(())
}

/// Serve on an already-bound listener. Split out so tests can bind port 0
/// and read back the local address.
pub async fn serve_on(
    listener: TcpListener,
    gateway: Arc<DealGateway>,
    shutdown: CancellationToken,
) {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "chineur listening");
    }

    loop {
        // Accept new connections, or break on shutdown signal
        let (stream, peer) = tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok(s) => s,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                }
            }
            _ = shutdown.cancelled() => {
                info!("server shutting down, no new connections accepted");
                break;
            }
        };

        let gateway = Arc::clone(&gateway);
        // One Tokio task per connection
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let svc = service_fn(move |req| {
                let gateway = Arc::clone(&gateway);
                async move { Ok::<_, hyper::Error>(handle_request(req, gateway).await) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, svc).await {
                debug!(%peer, "error serving connection: {e:?}");
            }
        });
    }
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    gateway: Arc<DealGateway>,
) -> Response<Full<Bytes>> {
    let endpoint = req.uri().path().to_string();
    let started = Instant::now();

    let response = match (req.method(), endpoint.as_str()) {
        (&Method::GET, "/ping") => text_response(StatusCode::OK, "pong"),
        (&Method::GET, "/api/amazon") => handle_search(req.uri().query(), gateway).await,
        _ => error_body(
            StatusCode::NOT_FOUND,
            &serde_json::json!({"error": "Ressource introuvable"}),
        ),
    };

    let status = if response.status().is_success() { "ok" } else { "error" };
    metrics::counter!(
        telemetry::REQUESTS_TOTAL,
        "endpoint" => endpoint.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "endpoint" => endpoint)
        .record(started.elapsed().as_secs_f64());

    response
}

async fn handle_search(
    raw_query: Option<&str>,
    gateway: Arc<DealGateway>,
) -> Response<Full<Bytes>> {
    let (keyword, category, page) = search_params(raw_query.unwrap_or(""));

    let query = match Query::from_params(keyword.as_deref(), category.as_deref(), page.as_deref())
    {
        Ok(query) => query,
        Err(err) => return error_response(&err),
    };

    match gateway.search_deals(&query).await {
        Ok(page) => json_response(StatusCode::OK, &page),
        Err(err) => {
            warn!(error = %err, keyword = query.keyword(), "search request failed");
            error_response(&err)
        }
    }
}

/// Pull the three recognized parameters out of the query string.
/// Unknown parameters are ignored; the last occurrence of a repeated
/// parameter wins.
fn search_params(raw: &str) -> (Option<String>, Option<String>, Option<String>) {
    let mut keyword = None;
    let mut category = None;
    let mut page = None;
    for (name, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match name.as_ref() {
            "keyword" => keyword = Some(value.into_owned()),
            "category" => category = Some(value.into_owned()),
            "page" => page = Some(value.into_owned()),
            _ => {}
        }
    }
    (keyword, category, page)
}

fn error_response(err: &ChineurError) -> Response<Full<Bytes>> {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    // Validation errors carry just the user message; classified upstream
    // failures add the underlying detail.
    let body = if err.is_validation() {
        serde_json::json!({"error": err.user_message()})
    } else {
        serde_json::json!({"error": err.user_message(), "details": err.to_string()})
    };
    error_body(status, &body)
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap(),
        Err(e) => {
            error!("response serialization failed: {e}");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                &serde_json::json!({"error": "Erreur interne"}),
            )
        }
    }
}

fn error_body(status: StatusCode, body: &serde_json::Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

fn text_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_extracts_known_names() {
        let (keyword, category, page) =
            search_params("keyword=casque%20audio&category=tech&page=2&utm_source=x");
        assert_eq!(keyword.as_deref(), Some("casque audio"));
        assert_eq!(category.as_deref(), Some("tech"));
        assert_eq!(page.as_deref(), Some("2"));
    }

    #[test]
    fn search_params_handles_empty_query() {
        let (keyword, category, page) = search_params("");
        assert!(keyword.is_none() && category.is_none() && page.is_none());
    }

    #[test]
    fn search_params_decodes_plus_and_percent() {
        let (keyword, _, _) = search_params("keyword=bons+plans");
        assert_eq!(keyword.as_deref(), Some("bons plans"));
        let (keyword, _, _) = search_params("keyword=beaut%C3%A9");
        assert_eq!(keyword.as_deref(), Some("beauté"));
    }
}
