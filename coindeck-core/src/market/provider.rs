//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over the remote price API so the
//! TUI worker can be exercised against a mock in tests. The real
//! implementation lives in `coingecko`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Immutable snapshot of one tracked asset, as of the last catalog fetch.
///
/// The catalog is replaced wholesale on every fetch; nothing mutates
/// individual snapshots after parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    /// Signed 24h change, in percent.
    pub price_change_percentage_24h: f64,
    pub market_cap: f64,
    pub market_cap_rank: u32,
    /// 24h high/low may be absent from the remote payload.
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
}

/// One daily price observation.
///
/// `index` is the zero-based position in the ascending series and is the
/// independent variable fed to the regression — not the date. Calendar gaps
/// are deliberately not corrected for.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSample {
    pub index: usize,
    pub date: NaiveDate,
    pub price: f64,
}

/// Structured error types for market data operations.
///
/// Every variant degrades a single panel to a neutral state; none is fatal.
#[derive(Debug, Clone, Error)]
pub enum MarketError {
    /// The remote call failed, timed out, or returned an empty payload.
    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    /// The remote answered, but not in the shape we expect.
    #[error("unexpected response format: {0}")]
    ResponseFormat(String),
}

/// Trait for market data sources.
///
/// Implementations own transport and encoding; callers only see the
/// `AssetSnapshot` / `PriceSample` shapes.
pub trait MarketDataProvider: Send {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the first page of tracked assets, ordered by descending
    /// market capitalization.
    fn fetch_markets(&self) -> Result<Vec<AssetSnapshot>, MarketError>;

    /// Fetch one price sample per day covering the lookback window,
    /// ascending chronological order, indices assigned by position.
    fn fetch_history(&self, asset_id: &str, days: u32) -> Result<Vec<PriceSample>, MarketError>;
}
