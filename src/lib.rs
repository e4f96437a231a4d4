//! Chineur — discount-deal proxy for the Amazon Product Advertising API.
//!
//! This crate fronts a PAAPI-shaped search upstream with a small gateway:
//! incoming keyword/category/page queries are validated, answered from a
//! short-lived response cache when possible, and otherwise forwarded
//! upstream through a minimum-interval throttle. Returned items are
//! filtered down to actual deals (≥ 5% discount) before being shaped into
//! the paginated response the frontend renders.
//!
//! # Example
//!
//! ```rust,no_run
//! use chineur::{Chineur, Credentials, Query};
//!
//! #[tokio::main]
//! async fn main() -> chineur::Result<()> {
//!     let gateway = Chineur::builder()
//!         .credentials(Credentials {
//!             access_key: "AKIA...".into(),
//!             secret_key: "secret".into(),
//!             partner_tag: "kifftondeal-21".into(),
//!         })
//!         .build()?;
//!
//!     let query = Query::from_params(Some("laptop"), Some("tech"), Some("2"))?;
//!     let page = gateway.search_deals(&query).await?;
//!
//!     println!("{} deals on page {}", page.items.len(), page.current_page);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod server;
pub mod telemetry;
pub mod throttle;
pub mod types;
pub mod upstream;

// Re-export main types at crate root
pub use error::{ChineurError, Result};
pub use gateway::{Chineur, ChineurBuilder, DealGateway};
pub use upstream::{Credentials, PaapiClient, SearchProvider};

// Re-export domain types
pub use types::{Category, Deal, DealsPage, MAX_PAGES, Query};
