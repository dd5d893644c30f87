//! Background worker thread — all network fetches run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Every
//! detail response carries the asset id it was issued for; the main thread
//! compares it against the current selection before applying it, so a slow
//! response for a stale selection is dropped rather than rendered.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use coindeck_core::forecast::{self, ForecastResult};
use coindeck_core::market::{AssetSnapshot, MarketDataProvider, PriceSample};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchCatalog,
    FetchDetail { asset_id: String },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    CatalogLoaded(Vec<AssetSnapshot>),
    CatalogFailed(String),
    DetailLoaded {
        asset_id: String,
        series: Vec<PriceSample>,
        forecast: ForecastResult,
    },
    DetailFailed {
        asset_id: String,
        error: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Box<dyn MarketDataProvider>,
    lookback_days: u32,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("coindeck-worker".into())
        .spawn(move || {
            worker_loop(rx, tx, provider, lookback_days);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Box<dyn MarketDataProvider>,
    lookback_days: u32,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::FetchCatalog) => handle_catalog(&tx, provider.as_ref()),
            Ok(WorkerCommand::FetchDetail { asset_id }) => {
                handle_detail(&tx, provider.as_ref(), &asset_id, lookback_days);
            }
        }
    }
}

fn handle_catalog(tx: &Sender<WorkerResponse>, provider: &dyn MarketDataProvider) {
    match provider.fetch_markets() {
        Ok(assets) => {
            tracing::info!(count = assets.len(), provider = provider.name(), "catalog loaded");
            let _ = tx.send(WorkerResponse::CatalogLoaded(assets));
        }
        Err(e) => {
            tracing::warn!(error = %e, "catalog fetch failed");
            let _ = tx.send(WorkerResponse::CatalogFailed(e.to_string()));
        }
    }
}

/// Fetch the full price series, then fit the trend. The forecast is only
/// computed once the whole window has arrived; partial series are never
/// forwarded.
fn handle_detail(
    tx: &Sender<WorkerResponse>,
    provider: &dyn MarketDataProvider,
    asset_id: &str,
    lookback_days: u32,
) {
    let series = match provider.fetch_history(asset_id, lookback_days) {
        Ok(series) => series,
        Err(e) => {
            tracing::warn!(asset_id, error = %e, "history fetch failed");
            let _ = tx.send(WorkerResponse::DetailFailed {
                asset_id: asset_id.to_string(),
                error: e.to_string(),
            });
            return;
        }
    };

    match forecast::forecast_next(&series) {
        Ok(forecast) => {
            let _ = tx.send(WorkerResponse::DetailLoaded {
                asset_id: asset_id.to_string(),
                series,
                forecast,
            });
        }
        Err(e) => {
            tracing::warn!(asset_id, error = %e, "forecast not computable");
            let _ = tx.send(WorkerResponse::DetailFailed {
                asset_id: asset_id.to_string(),
                error: e.to_string(),
            });
        }
    }
}
