//! Market data access — provider trait plus the CoinGecko implementation.

pub mod coingecko;
pub mod provider;

pub use coingecko::CoinGeckoProvider;
pub use provider::{AssetSnapshot, MarketDataProvider, MarketError, PriceSample};
