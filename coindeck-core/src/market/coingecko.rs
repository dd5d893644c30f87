//! CoinGecko market data provider.
//!
//! Fetches the asset catalog from `/coins/markets` and daily price history
//! from `/coins/{id}/market_chart`. The public, unauthenticated API is used;
//! a single fixed quote currency applies to both endpoints.
//!
//! All transport failures, timeouts, and empty payloads collapse into
//! `MarketError::DataUnavailable` — callers render a neutral state instead
//! of crashing.

use std::time::Duration;

use serde::Deserialize;

use super::provider::{AssetSnapshot, MarketDataProvider, MarketError, PriceSample};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// One row of the `/coins/markets` response. Numeric fields can be null for
/// thinly traded assets, hence the Options.
#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    symbol: String,
    name: String,
    current_price: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    market_cap: Option<f64>,
    market_cap_rank: Option<u32>,
    high_24h: Option<f64>,
    low_24h: Option<f64>,
}

/// `/coins/{id}/market_chart` response. `prices` is an array of
/// `[epoch_millis, price]` pairs, ascending by timestamp. Timestamps are
/// decoded as f64 because the API is not consistent about integer encoding.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    prices: Vec<(f64, f64)>,
}

/// CoinGecko REST client.
pub struct CoinGeckoProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    quote_currency: String,
    page_size: u32,
}

impl CoinGeckoProvider {
    pub fn new(
        base_url: impl Into<String>,
        quote_currency: impl Into<String>,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, MarketError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coindeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MarketError::DataUnavailable(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            quote_currency: quote_currency.into(),
            page_size,
        })
    }

    fn markets_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1",
            self.base_url, self.quote_currency, self.page_size
        )
    }

    fn chart_url(&self, asset_id: &str, days: u32) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}&interval=daily",
            self.base_url, asset_id, self.quote_currency, days
        )
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, MarketError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| MarketError::DataUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MarketError::DataUnavailable(format!("HTTP {status}")));
        }

        resp.json::<T>()
            .map_err(|e| MarketError::ResponseFormat(e.to_string()))
    }

    /// Map catalog rows to snapshots. Rows missing the fields every card
    /// needs (price, rank) are skipped rather than failing the whole page.
    fn parse_markets(rows: Vec<MarketRow>) -> Result<Vec<AssetSnapshot>, MarketError> {
        let assets: Vec<AssetSnapshot> = rows
            .into_iter()
            .filter_map(|row| {
                let current_price = row.current_price?;
                let market_cap_rank = row.market_cap_rank?;
                Some(AssetSnapshot {
                    id: row.id,
                    name: row.name,
                    symbol: row.symbol,
                    current_price,
                    price_change_percentage_24h: row.price_change_percentage_24h.unwrap_or(0.0),
                    market_cap: row.market_cap.unwrap_or(0.0),
                    market_cap_rank,
                    high_24h: row.high_24h,
                    low_24h: row.low_24h,
                })
            })
            .collect();

        if assets.is_empty() {
            return Err(MarketError::DataUnavailable("empty catalog".into()));
        }
        Ok(assets)
    }

    /// Convert `[epoch_millis, price]` pairs into indexed daily samples.
    fn parse_chart(resp: ChartResponse) -> Result<Vec<PriceSample>, MarketError> {
        let mut samples = Vec::with_capacity(resp.prices.len());
        for (index, (millis, price)) in resp.prices.into_iter().enumerate() {
            let date = chrono::DateTime::from_timestamp_millis(millis as i64)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    MarketError::ResponseFormat(format!("invalid timestamp: {millis}"))
                })?;
            samples.push(PriceSample { index, date, price });
        }

        if samples.is_empty() {
            return Err(MarketError::DataUnavailable("empty price history".into()));
        }
        Ok(samples)
    }
}

impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch_markets(&self) -> Result<Vec<AssetSnapshot>, MarketError> {
        let url = self.markets_url();
        tracing::debug!(%url, "fetching asset catalog");
        let rows: Vec<MarketRow> = self.get_json(&url)?;
        Self::parse_markets(rows)
    }

    fn fetch_history(&self, asset_id: &str, days: u32) -> Result<Vec<PriceSample>, MarketError> {
        let url = self.chart_url(asset_id, days);
        tracing::debug!(%url, asset_id, "fetching price history");
        let chart: ChartResponse = self.get_json(&url)?;
        Self::parse_chart(chart)
    }
}
