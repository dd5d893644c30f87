//! Application state — single-owner, main-thread only.
//!
//! Two orthogonal state machines live here. The catalog axis moves
//! `Loading → Ready | Failed` once per session (Failed is terminal, no
//! retry). The selection axis moves `None ⇄ Loading ⇄ Ready | Failed` per
//! asset; selecting a new asset discards prior detail state entirely and
//! closing returns to `None` regardless of in-flight fetches. Late worker
//! responses are applied only if their asset id still matches the current
//! selection.

use std::sync::mpsc::{Receiver, Sender};

use coindeck_core::filter::{self, FilterQuery};
use coindeck_core::forecast::ForecastResult;
use coindeck_core::market::{AssetSnapshot, PriceSample};
use coindeck_core::watchlist::WatchlistStore;

use crate::config::Config;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Catalog fetch lifecycle. `Failed` is terminal for the session.
#[derive(Debug)]
pub enum CatalogState {
    Loading,
    Ready(Vec<AssetSnapshot>),
    Failed(String),
}

/// Per-asset detail lifecycle. At most one asset is open at a time.
#[derive(Debug)]
pub enum Selection {
    None,
    Loading {
        asset: AssetSnapshot,
    },
    Ready {
        asset: AssetSnapshot,
        series: Vec<PriceSample>,
        forecast: ForecastResult,
    },
    Failed {
        asset: AssetSnapshot,
    },
}

impl Selection {
    /// Id of the currently open asset, if any. Stale worker responses are
    /// matched against this.
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Loading { asset }
            | Selection::Ready { asset, .. }
            | Selection::Failed { asset } => Some(&asset.id),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Selection::None)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    pub catalog: CatalogState,
    pub query: FilterQuery,
    /// Cursor into the visible (filtered) asset list.
    pub cursor: usize,
    pub watchlist: WatchlistStore,
    pub selection: Selection,

    pub status_message: Option<(String, StatusLevel)>,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    pub config: Config,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        watchlist: WatchlistStore,
        config: Config,
    ) -> Self {
        Self {
            running: true,
            catalog: CatalogState::Loading,
            query: FilterQuery::default(),
            cursor: 0,
            watchlist,
            selection: Selection::None,
            status_message: None,
            worker_tx,
            worker_rx,
            config,
        }
    }

    /// The filtered catalog subset, in catalog order. Empty while loading
    /// or after a failed catalog fetch.
    pub fn visible_assets(&self) -> Vec<&AssetSnapshot> {
        match &self.catalog {
            CatalogState::Ready(assets) => filter::visible(assets, &self.query, &self.watchlist),
            _ => Vec::new(),
        }
    }

    /// Keep the cursor inside the visible list after any filter change.
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_assets().len();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let count = self.visible_assets().len();
        if count == 0 {
            return;
        }
        if delta > 0 {
            self.cursor = (self.cursor + delta as usize).min(count - 1);
        } else {
            self.cursor = self.cursor.saturating_sub(delta.unsigned_abs() as usize);
        }
    }

    /// Open the asset under the cursor. Always refetches — even when the
    /// same asset is re-selected — and discards whatever detail state came
    /// before.
    pub fn select_under_cursor(&mut self) {
        let Some(asset) = self.visible_assets().get(self.cursor).cloned().cloned() else {
            return;
        };
        let asset_id = asset.id.clone();
        self.selection = Selection::Loading { asset };
        let _ = self.worker_tx.send(WorkerCommand::FetchDetail { asset_id });
    }

    /// Close the detail overlay unconditionally, loading or not. Any
    /// response still in flight for it will be dropped on arrival.
    pub fn close_detail(&mut self) {
        self.selection = Selection::None;
    }

    /// Flip the favorite star of the asset under the cursor. The store
    /// persists synchronously as part of the toggle.
    pub fn toggle_favorite_under_cursor(&mut self) {
        let Some(id) = self.visible_assets().get(self.cursor).map(|a| a.id.clone()) else {
            return;
        };
        self.watchlist.toggle(&id);
        // Narrowing the watchlist-only view can shrink the list under us.
        self.clamp_cursor();
    }

    pub fn toggle_watchlist_only(&mut self) {
        self.query.watchlist_only = !self.query.watchlist_only;
        self.cursor = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.text.push(c);
        self.cursor = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.query.text.pop();
        self.clamp_cursor();
    }

    /// Apply a worker response to the state machines.
    pub fn apply_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::CatalogLoaded(assets) => {
                self.set_status(format!("{} assets loaded", assets.len()));
                self.catalog = CatalogState::Ready(assets);
                self.cursor = 0;
            }
            WorkerResponse::CatalogFailed(error) => {
                self.status_message =
                    Some((format!("Market data unavailable: {error}"), StatusLevel::Error));
                self.catalog = CatalogState::Failed(error);
            }
            WorkerResponse::DetailLoaded {
                asset_id,
                series,
                forecast,
            } => {
                if self.selection.asset_id() != Some(asset_id.as_str()) {
                    tracing::debug!(asset_id, "dropping stale detail response");
                    return;
                }
                let asset = match std::mem::replace(&mut self.selection, Selection::None) {
                    Selection::Loading { asset }
                    | Selection::Ready { asset, .. }
                    | Selection::Failed { asset } => asset,
                    Selection::None => unreachable!("asset_id matched above"),
                };
                self.selection = Selection::Ready {
                    asset,
                    series,
                    forecast,
                };
            }
            WorkerResponse::DetailFailed { asset_id, error } => {
                if self.selection.asset_id() != Some(asset_id.as_str()) {
                    tracing::debug!(asset_id, "dropping stale detail failure");
                    return;
                }
                self.status_message =
                    Some((format!("Analysis unavailable: {error}"), StatusLevel::Warning));
                let asset = match std::mem::replace(&mut self.selection, Selection::None) {
                    Selection::Loading { asset }
                    | Selection::Ready { asset, .. }
                    | Selection::Failed { asset } => asset,
                    Selection::None => unreachable!("asset_id matched above"),
                };
                self.selection = Selection::Failed { asset };
            }
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn test_asset(id: &str, name: &str, symbol: &str) -> AssetSnapshot {
        AssetSnapshot {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            current_price: 100.0,
            price_change_percentage_24h: 1.0,
            market_cap: 1e9,
            market_cap_rank: 1,
            high_24h: None,
            low_24h: None,
        }
    }

    fn test_series(prices: &[f64]) -> Vec<PriceSample> {
        let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PriceSample {
                index: i,
                date: base_date + chrono::Duration::days(i as i64),
                price,
            })
            .collect()
    }

    fn test_forecast() -> ForecastResult {
        ForecastResult {
            estimate: 110.0,
            slope: 2.0,
            intercept: 96.0,
        }
    }

    /// App with a loaded three-asset catalog and a drained command channel.
    fn ready_app() -> (AppState, Receiver<WorkerCommand>) {
        let (tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, rx) = mpsc::channel();
        let mut app = AppState::new(tx, rx, WatchlistStore::in_memory(), Config::default());
        app.apply_response(WorkerResponse::CatalogLoaded(vec![
            test_asset("bitcoin", "Bitcoin", "btc"),
            test_asset("ethereum", "Ethereum", "eth"),
            test_asset("solana", "Solana", "sol"),
        ]));
        (app, cmd_rx)
    }

    #[test]
    fn catalog_failure_is_terminal_and_grid_is_empty() {
        let (tx, _cmd_rx) = mpsc::channel();
        let (_resp_tx, rx) = mpsc::channel();
        let mut app = AppState::new(tx, rx, WatchlistStore::in_memory(), Config::default());

        app.apply_response(WorkerResponse::CatalogFailed("offline".into()));
        assert!(matches!(app.catalog, CatalogState::Failed(_)));
        assert!(app.visible_assets().is_empty());
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Error))
        ));
    }

    #[test]
    fn search_narrows_the_visible_list() {
        let (mut app, _cmd_rx) = ready_app();
        for c in "eth".chars() {
            app.push_query_char(c);
        }
        let visible = app.visible_assets();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "ethereum");
    }

    #[test]
    fn select_sends_a_fetch_and_enters_loading() {
        let (mut app, cmd_rx) = ready_app();
        app.move_cursor(1);
        app.select_under_cursor();

        assert_eq!(app.selection.asset_id(), Some("ethereum"));
        assert!(matches!(app.selection, Selection::Loading { .. }));
        match cmd_rx.try_recv().unwrap() {
            WorkerCommand::FetchDetail { asset_id } => assert_eq!(asset_id, "ethereum"),
            other => panic!("expected FetchDetail, got {other:?}"),
        }
    }

    #[test]
    fn stale_detail_response_is_dropped() {
        let (mut app, _cmd_rx) = ready_app();

        // Select bitcoin, then ethereum before bitcoin's fetch resolves.
        app.select_under_cursor();
        app.move_cursor(1);
        app.select_under_cursor();
        assert_eq!(app.selection.asset_id(), Some("ethereum"));

        // Bitcoin's slow response arrives late: must not resurrect it.
        app.apply_response(WorkerResponse::DetailLoaded {
            asset_id: "bitcoin".into(),
            series: test_series(&[1.0, 2.0, 3.0]),
            forecast: test_forecast(),
        });
        assert_eq!(app.selection.asset_id(), Some("ethereum"));
        assert!(matches!(app.selection, Selection::Loading { .. }));

        // Ethereum's own response applies.
        app.apply_response(WorkerResponse::DetailLoaded {
            asset_id: "ethereum".into(),
            series: test_series(&[1.0, 2.0, 3.0]),
            forecast: test_forecast(),
        });
        assert!(matches!(app.selection, Selection::Ready { .. }));
        assert_eq!(app.selection.asset_id(), Some("ethereum"));
    }

    #[test]
    fn response_after_close_is_dropped() {
        let (mut app, _cmd_rx) = ready_app();
        app.select_under_cursor();
        app.close_detail();
        assert!(!app.selection.is_open());

        app.apply_response(WorkerResponse::DetailLoaded {
            asset_id: "bitcoin".into(),
            series: test_series(&[1.0, 2.0]),
            forecast: test_forecast(),
        });
        assert!(!app.selection.is_open());
    }

    #[test]
    fn close_works_regardless_of_loading_state() {
        let (mut app, _cmd_rx) = ready_app();
        app.select_under_cursor();
        assert!(app.selection.is_open());
        app.close_detail();
        assert!(!app.selection.is_open());
    }

    #[test]
    fn reselecting_the_same_asset_refetches() {
        let (mut app, cmd_rx) = ready_app();
        app.select_under_cursor();
        app.apply_response(WorkerResponse::DetailLoaded {
            asset_id: "bitcoin".into(),
            series: test_series(&[1.0, 2.0]),
            forecast: test_forecast(),
        });
        assert!(matches!(app.selection, Selection::Ready { .. }));

        app.select_under_cursor();
        assert!(matches!(app.selection, Selection::Loading { .. }));
        // Two fetch commands were issued, one per selection.
        let fetches = std::iter::from_fn(|| cmd_rx.try_recv().ok())
            .filter(|c| matches!(c, WorkerCommand::FetchDetail { .. }))
            .count();
        assert_eq!(fetches, 2);
    }

    #[test]
    fn detail_failure_degrades_only_the_overlay() {
        let (mut app, _cmd_rx) = ready_app();
        app.select_under_cursor();
        app.apply_response(WorkerResponse::DetailFailed {
            asset_id: "bitcoin".into(),
            error: "market data unavailable: timeout".into(),
        });
        assert!(matches!(app.selection, Selection::Failed { .. }));
        // The catalog grid is untouched.
        assert_eq!(app.visible_assets().len(), 3);
    }

    #[test]
    fn watchlist_only_toggle_filters_the_grid() {
        let (mut app, _cmd_rx) = ready_app();
        app.toggle_watchlist_only();
        assert!(app.visible_assets().is_empty());

        app.toggle_watchlist_only();
        app.move_cursor(2);
        app.toggle_favorite_under_cursor();
        app.toggle_watchlist_only();

        let visible = app.visible_assets();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "solana");
    }

    #[test]
    fn cursor_clamps_when_the_filter_shrinks_the_list() {
        let (mut app, _cmd_rx) = ready_app();
        app.move_cursor(2);
        assert_eq!(app.cursor, 2);
        for c in "sol".chars() {
            app.push_query_char(c);
        }
        // push_query_char resets to 0; one visible asset remains.
        assert_eq!(app.cursor, 0);
        app.pop_query_char();
        app.clamp_cursor();
        assert!(app.cursor < app.visible_assets().len().max(1));
    }

    #[test]
    fn cursor_stops_at_list_edges() {
        let (mut app, _cmd_rx) = ready_app();
        app.move_cursor(-5);
        assert_eq!(app.cursor, 0);
        app.move_cursor(99);
        assert_eq!(app.cursor, 2);
    }
}
