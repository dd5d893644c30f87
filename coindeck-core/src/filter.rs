//! Catalog filter engine.
//!
//! Pure function of (catalog snapshot, query, watchlist) → visible subset,
//! preserving catalog order. No matches is a valid, empty result.

use crate::market::AssetSnapshot;
use crate::watchlist::WatchlistStore;

/// Transient UI filter state. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    /// Case-insensitive substring matched against name and symbol.
    /// Empty matches everything.
    pub text: String,
    pub watchlist_only: bool,
}

/// An asset matches if its name or symbol contains the query text
/// case-insensitively, and — when watchlist-only is active — it is a
/// member of the watchlist.
pub fn matches(asset: &AssetSnapshot, query: &FilterQuery, watchlist: &WatchlistStore) -> bool {
    if query.watchlist_only && !watchlist.contains(&asset.id) {
        return false;
    }
    if query.text.is_empty() {
        return true;
    }
    let needle = query.text.to_lowercase();
    asset.name.to_lowercase().contains(&needle) || asset.symbol.to_lowercase().contains(&needle)
}

/// Derive the visible subset of the catalog, in catalog order.
pub fn visible<'a>(
    catalog: &'a [AssetSnapshot],
    query: &FilterQuery,
    watchlist: &WatchlistStore,
) -> Vec<&'a AssetSnapshot> {
    catalog
        .iter()
        .filter(|asset| matches(asset, query, watchlist))
        .collect()
}
