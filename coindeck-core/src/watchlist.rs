//! Watchlist store — favorited asset ids, persisted on every mutation.
//!
//! One JSON file holds the full set (an array of ids). The file is read once
//! at startup; every `toggle` rewrites it synchronously. There is no public
//! save operation — persistence is a side effect of mutation only.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Set of favorited asset identifiers.
///
/// Stale ids (assets no longer in the catalog) are tolerated, not purged.
#[derive(Debug)]
pub struct WatchlistStore {
    path: Option<PathBuf>,
    ids: HashSet<String>,
}

impl WatchlistStore {
    /// Read the persisted set from `path`. A missing or unparseable file
    /// yields an empty watchlist; corruption is logged, never surfaced.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<String>>(&content) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e,
                        "watchlist file corrupt, starting empty");
                    HashSet::new()
                }
            },
            Err(_) => HashSet::new(),
        };
        Self {
            path: Some(path),
            ids,
        }
    }

    /// A store with no backing file. Toggles mutate the set only.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            ids: HashSet::new(),
        }
    }

    /// Flip membership of `id` and persist the full set. Toggling twice
    /// restores the set, though each call still writes.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
        self.persist();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) {
        let Some(path) = &self.path else { return };

        // Sorted output keeps the file diffable across sessions.
        let mut ids: Vec<&String> = self.ids.iter().collect();
        ids.sort();

        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(&ids)?;
            std::fs::write(path, json)
        })();

        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "watchlist write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("coindeck_watchlist_{name}"))
            .join("watchlist.json")
    }

    fn cleanup(path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    fn read_ids(path: &Path) -> Vec<String> {
        let content = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn missing_file_starts_empty() {
        let store = WatchlistStore::load("/nonexistent/path/watchlist.json");
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not valid json {{{").unwrap();

        let store = WatchlistStore::load(&path);
        assert!(store.is_empty());

        cleanup(&path);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let path = temp_path("double_toggle");
        let mut store = WatchlistStore::load(&path);

        assert!(!store.contains("ethereum"));
        store.toggle("ethereum");
        assert!(store.contains("ethereum"));
        store.toggle("ethereum");
        assert!(!store.contains("ethereum"));

        cleanup(&path);
    }

    #[test]
    fn every_toggle_writes_the_full_set() {
        let path = temp_path("write_per_toggle");
        let mut store = WatchlistStore::load(&path);

        store.toggle("bitcoin");
        assert_eq!(read_ids(&path), vec!["bitcoin"]);

        store.toggle("ethereum");
        assert_eq!(read_ids(&path), vec!["bitcoin", "ethereum"]);

        store.toggle("bitcoin");
        assert_eq!(read_ids(&path), vec!["ethereum"]);

        cleanup(&path);
    }

    #[test]
    fn reload_sees_persisted_favorites() {
        let path = temp_path("reload");
        {
            let mut store = WatchlistStore::load(&path);
            store.toggle("ethereum");
        }

        let reloaded = WatchlistStore::load(&path);
        assert!(reloaded.contains("ethereum"));
        assert_eq!(reloaded.len(), 1);

        cleanup(&path);
    }

    #[test]
    fn in_memory_store_never_touches_disk() {
        let mut store = WatchlistStore::in_memory();
        store.toggle("bitcoin");
        assert!(store.contains("bitcoin"));
        assert!(store.path().is_none());
    }
}
