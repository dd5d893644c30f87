//! Coindeck TUI — terminal market dashboard.
//!
//! Surface:
//! - Catalog grid of assets (price, 24h change, favorite star)
//! - Live search filter and watchlist-only toggle
//! - Per-asset detail overlay with a price chart and an OLS trend forecast

mod app;
mod config;
mod input;
mod theme;
mod ui;
mod worker;

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use coindeck_core::market::CoinGeckoProvider;
use coindeck_core::watchlist::WatchlistStore;

use crate::app::AppState;
use crate::config::Config;
use crate::worker::WorkerCommand;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let app_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coindeck");
    let config_path = app_dir.join("config.toml");
    let watchlist_path = app_dir.join("watchlist.json");
    let log_path = app_dir.join("coindeck.log");

    // The terminal owns stdout while in raw mode, so diagnostics go to a file.
    init_logging(&log_path);

    let config = Config::load(&config_path);
    let watchlist = WatchlistStore::load(&watchlist_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let provider = CoinGeckoProvider::new(
        config.api_base_url.clone(),
        config.quote_currency.clone(),
        config.page_size,
        config.request_timeout(),
    )?;
    let worker_handle =
        worker::spawn_worker(cmd_rx, resp_tx, Box::new(provider), config.lookback_days);

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, watchlist, config);

    // The catalog is fetched once per session; failure is terminal.
    let _ = cmd_tx.send(WorkerCommand::FetchCatalog);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking). Stale detail responses
        //    are detected and dropped inside apply_response.
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.apply_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn init_logging(log_path: &Path) {
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path) else {
        return;
    };
    let filter =
        EnvFilter::try_from_env("COINDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .try_init();
}
