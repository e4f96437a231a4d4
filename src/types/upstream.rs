//! Wire types for the upstream search API.
//!
//! Field names follow the PAAPI JSON shapes. The upstream may omit any
//! nested field, so everything below the top level is `Option` (or an
//! empty `Vec`) — absence must short-circuit in callers, never panic.

use serde::{Deserialize, Serialize};

/// Logical search request handed to a [`SearchProvider`](crate::SearchProvider).
///
/// Partner tag, marketplace, and credentials are the client's concern and
/// are attached at the wire level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchRequest {
    pub keywords: String,
    pub search_index: String,
    pub item_count: u32,
    pub item_page: u32,
    pub resources: Vec<String>,
}

/// Top-level search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "SearchResult")]
    pub search_result: Option<SearchResult>,
}

impl SearchResponse {
    /// The returned items, empty when the result block is absent.
    pub fn into_items(self) -> Vec<SearchItem> {
        self.search_result.map(|r| r.items).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "Items", default)]
    pub items: Vec<SearchItem>,
}

/// One raw upstream item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "ItemInfo")]
    pub item_info: Option<ItemInfo>,
    #[serde(rename = "Images")]
    pub images: Option<Images>,
    #[serde(rename = "Offers")]
    pub offers: Option<Offers>,
    #[serde(rename = "DetailPageURL")]
    pub detail_page_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemInfo {
    #[serde(rename = "Title")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Title {
    #[serde(rename = "DisplayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Images {
    #[serde(rename = "Primary")]
    pub primary: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSet {
    #[serde(rename = "Medium")]
    pub medium: Option<ImageRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRef {
    #[serde(rename = "URL")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Offers {
    #[serde(rename = "Listings", default)]
    pub listings: Vec<Listing>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Listing {
    #[serde(rename = "Price")]
    pub price: Option<Money>,
    #[serde(rename = "Savings")]
    pub savings: Option<Money>,
}

/// A price or savings amount with its display form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Money {
    #[serde(rename = "Amount")]
    pub amount: Option<f64>,
    #[serde(rename = "DisplayAmount")]
    pub display_amount: Option<String>,
}
