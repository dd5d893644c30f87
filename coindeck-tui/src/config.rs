//! Runtime configuration — `config.toml` in the user config dir.
//!
//! Every field has a default; a missing file means defaults, a corrupt file
//! means defaults plus a diagnostic log line. The config is read once at
//! startup and never written back.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use coindeck_core::market::coingecko::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed quote currency for both catalog and history requests.
    pub quote_currency: String,
    /// Lookback window for the forecast, in days.
    pub lookback_days: u32,
    /// Catalog page size (first page only).
    pub page_size: u32,
    pub api_base_url: String,
    /// Bound on every remote request; hitting it degrades to
    /// "data unavailable".
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_currency: "usd".to_string(),
            lookback_days: 7,
            page_size: 100,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults if missing or corrupt.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e,
                        "config file corrupt, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("coindeck_config_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("config.toml")
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.quote_currency, "usd");
        assert_eq!(config.lookback_days, 7);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "lookback_days = [not toml").unwrap();
        let config = Config::load(&path);
        assert_eq!(config.lookback_days, 7);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, "lookback_days = 30\nquote_currency = \"eur\"\n").unwrap();
        let config = Config::load(&path);
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.quote_currency, "eur");
        assert_eq!(config.page_size, 100);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
