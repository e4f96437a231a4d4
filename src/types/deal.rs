//! Outbound response shapes.

use serde::{Deserialize, Serialize};

/// One upstream item that survived the discount filter.
///
/// Ephemeral — built per request, never persisted. URLs and display price
/// stay optional because the upstream may omit them; the frontend falls
/// back to placeholder text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub title: String,
    pub image_url: Option<String>,
    pub display_price: Option<String>,
    pub price_amount: f64,
    pub savings_amount: f64,
    pub detail_page_url: Option<String>,
}

/// The response body for `/api/amazon`.
///
/// `total_pages` is a fixed constant ([`MAX_PAGES`](crate::MAX_PAGES)), not
/// derived from the upstream result count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealsPage {
    pub items: Vec<Deal>,
    pub current_page: u32,
    pub total_pages: u32,
}
