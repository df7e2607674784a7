//! Snapshot persistence.
//!
//! The store is a best-effort, write-through cache of the latest accepted
//! scan per page plus the display theme preference. It is never the system
//! of record.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::error::{Error, Result};
use crate::result::PageSnapshot;
use crate::settings::Theme;

const SNAPSHOT_TREE: &str = "snapshots";
const SETTINGS_TREE: &str = "settings";
const THEME_KEY: &str = "theme";

/// Key-value persistence for page snapshots and settings.
pub trait SnapshotStore: Send + Sync {
    /// Overwrite the snapshot for `page`.
    fn save(&self, page: &str, snapshot: &PageSnapshot) -> Result<()>;

    /// Snapshot for `page`, if one was saved.
    fn load(&self, page: &str) -> Result<Option<PageSnapshot>>;

    /// Delete the snapshot for `page`. Missing snapshots are not an error.
    fn remove(&self, page: &str) -> Result<()>;

    /// Saved theme preference, `Theme::Light` if none was saved.
    fn theme(&self) -> Result<Theme>;

    /// Persist the theme preference.
    fn set_theme(&self, theme: Theme) -> Result<()>;
}

/// In-process store, for tests and for embedding without a disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: Mutex<HashMap<String, PageSnapshot>>,
    theme: Mutex<Option<Theme>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> Error {
    Error::Store("memory store lock poisoned".to_string())
}

impl SnapshotStore for MemoryStore {
    fn save(&self, page: &str, snapshot: &PageSnapshot) -> Result<()> {
        self.snapshots
            .lock()
            .map_err(poisoned)?
            .insert(page.to_string(), snapshot.clone());
        Ok(())
    }

    fn load(&self, page: &str) -> Result<Option<PageSnapshot>> {
        Ok(self.snapshots.lock().map_err(poisoned)?.get(page).cloned())
    }

    fn remove(&self, page: &str) -> Result<()> {
        self.snapshots.lock().map_err(poisoned)?.remove(page);
        Ok(())
    }

    fn theme(&self) -> Result<Theme> {
        Ok(self.theme.lock().map_err(poisoned)?.unwrap_or_default())
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        *self.theme.lock().map_err(poisoned)? = Some(theme);
        Ok(())
    }
}

/// Disk-backed store on a `sled` database.
///
/// Snapshots live in the `snapshots` tree keyed by page, as JSON; the theme
/// lives under `theme` in the `settings` tree.
#[derive(Debug, Clone)]
pub struct SledStore {
    snapshots: sled::Tree,
    settings: sled::Tree,
}

impl SledStore {
    /// Open (or create) a store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_db(&sled::open(path)?)
    }

    /// Use an already opened database.
    pub fn from_db(db: &sled::Db) -> Result<Self> {
        Ok(Self {
            snapshots: db.open_tree(SNAPSHOT_TREE)?,
            settings: db.open_tree(SETTINGS_TREE)?,
        })
    }
}

impl SnapshotStore for SledStore {
    fn save(&self, page: &str, snapshot: &PageSnapshot) -> Result<()> {
        let json = serde_json::to_vec(snapshot)?;
        self.snapshots.insert(page.as_bytes(), json)?;
        self.snapshots.flush()?;
        Ok(())
    }

    fn load(&self, page: &str) -> Result<Option<PageSnapshot>> {
        match self.snapshots.get(page.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn remove(&self, page: &str) -> Result<()> {
        self.snapshots.remove(page.as_bytes())?;
        self.snapshots.flush()?;
        Ok(())
    }

    fn theme(&self) -> Result<Theme> {
        match self.settings.get(THEME_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Theme::default()),
        }
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        self.settings.insert(THEME_KEY, serde_json::to_vec(&theme)?)?;
        self.settings.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(title: &str) -> PageSnapshot {
        PageSnapshot {
            references: Vec::new(),
            last_update: Utc::now(),
            page_url: "https://example.org/paper".to_string(),
            page_title: title.to_string(),
        }
    }

    fn exercise(store: &dyn SnapshotStore) {
        let page = "https://example.org/paper";

        assert!(store.load(page).unwrap().is_none());

        store.save(page, &snapshot("first")).unwrap();
        store.save(page, &snapshot("second")).unwrap();
        let loaded = store.load(page).unwrap().unwrap();
        assert_eq!(loaded.page_title, "second");

        assert!(store.load("https://example.org/other").unwrap().is_none());

        store.remove(page).unwrap();
        assert!(store.load(page).unwrap().is_none());
        store.remove(page).unwrap();

        assert_eq!(store.theme().unwrap(), Theme::Light);
        store.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_sled_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledStore::open(dir.path().join("db")).unwrap();
        exercise(&store);
    }
}
