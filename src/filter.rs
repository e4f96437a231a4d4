//! Discount filter.
//!
//! Pure, stateless pass over raw upstream items: only items whose first
//! listing shows a discount of at least [`MIN_DISCOUNT_PERCENT`] survive,
//! converted to [`Deal`]s in upstream order. Items without a listing or a
//! price amount are excluded outright.

use crate::types::upstream::SearchItem;
use crate::types::Deal;

/// Minimum discount percentage for an item to count as a deal.
pub const MIN_DISCOUNT_PERCENT: f64 = 5.0;

/// Title shown when the upstream omits one.
pub const DEFAULT_TITLE: &str = "Sans titre";

/// Discount percentage for a price/savings pair.
///
/// `None` when `price + savings == 0` — the pre-discount price is the
/// divisor, so a zero total would divide by zero.
pub fn discount_percent(price: f64, savings: f64) -> Option<f64> {
    let original = price + savings;
    if original == 0.0 {
        return None;
    }
    Some(savings / original * 100.0)
}

/// Retain the items at or above the discount threshold, in upstream order.
pub fn filter_deals(items: Vec<SearchItem>) -> Vec<Deal> {
    items.into_iter().filter_map(deal_from_item).collect()
}

fn deal_from_item(item: SearchItem) -> Option<Deal> {
    let SearchItem {
        item_info,
        images,
        offers,
        detail_page_url,
    } = item;

    let listing = offers?.listings.into_iter().next()?;
    let price = listing.price.as_ref()?.amount?;
    let savings = listing
        .savings
        .as_ref()
        .and_then(|s| s.amount)
        .unwrap_or(0.0);

    if discount_percent(price, savings)? < MIN_DISCOUNT_PERCENT {
        return None;
    }

    Some(Deal {
        title: item_info
            .and_then(|i| i.title)
            .and_then(|t| t.display_value)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        image_url: images
            .and_then(|i| i.primary)
            .and_then(|p| p.medium)
            .and_then(|m| m.url),
        display_price: listing.price.as_ref().and_then(|p| p.display_amount.clone()),
        price_amount: price,
        savings_amount: savings,
        detail_page_url,
    })
}
