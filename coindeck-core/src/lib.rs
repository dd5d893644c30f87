//! Coindeck Core — market data model, trend forecasting, filtering, watchlist.
//!
//! This crate contains everything below the terminal UI:
//! - Market data types and the provider trait (CoinGecko implementation)
//! - Ordinary least-squares trend forecaster
//! - Catalog filter engine (text query + watchlist-only)
//! - Watchlist store with persist-on-mutation semantics

pub mod filter;
pub mod forecast;
pub mod market;
pub mod watchlist;

pub use filter::FilterQuery;
pub use forecast::{forecast_next, ForecastError, ForecastResult};
pub use market::{AssetSnapshot, MarketDataProvider, MarketError, PriceSample};
pub use watchlist::WatchlistStore;
