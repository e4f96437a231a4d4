//! Telemetry metric name constants.
//!
//! Centralised metric names for chineur operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `chineur_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint` — HTTP route (e.g. "/api/amazon", "/ping")
//! - `status` — outcome: "ok" or "error"

/// Total HTTP requests handled by the server.
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "chineur_requests_total";

/// Request duration in seconds.
///
/// Labels: `endpoint`.
pub const REQUEST_DURATION_SECONDS: &str = "chineur_request_duration_seconds";

/// Total calls issued to the upstream search API.
///
/// Labels: `status` ("ok" | "error").
pub const UPSTREAM_CALLS_TOTAL: &str = "chineur_upstream_calls_total";

/// Total deal-page cache hits.
pub const CACHE_HITS_TOTAL: &str = "chineur_cache_hits_total";

/// Total deal-page cache misses.
pub const CACHE_MISSES_TOTAL: &str = "chineur_cache_misses_total";

/// Time spent waiting out the upstream call throttle, in seconds.
pub const THROTTLE_WAIT_SECONDS: &str = "chineur_throttle_wait_seconds";
