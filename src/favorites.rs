//! Persisted favorites set.
//!
//! A small set of entity ids stored as a JSON list of integers under one
//! file path, the client-storage analog. Loaded once at startup and
//! re-persisted write-through on every toggle.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    ids: BTreeSet<u32>,
}

impl FavoritesStore {
    /// Load the persisted set. A missing file is a normal first run and
    /// yields an empty set; a corrupt file is logged and discarded.
    pub fn load(path: PathBuf) -> Self {
        let ids = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<u32>>(&content) {
                Ok(list) => list.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding corrupt favorites file");
                    BTreeSet::new()
                }
            },
            Err(_) => BTreeSet::new(),
        };
        FavoritesStore { path, ids }
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &BTreeSet<u32> {
        &self.ids
    }

    /// Flip membership for `id`, persist the full set immediately, and
    /// return the new state (true = now a favorite).
    pub fn toggle(&mut self, id: u32) -> bool {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        self.persist();
        now_favorite
    }

    /// Write-through persist of the whole set. A write failure is logged;
    /// the in-memory state stands.
    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).ok();
            }
        }
        let list: Vec<u32> = self.ids.iter().copied().collect();
        match serde_json::to_string(&list) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), error = %e, "could not persist favorites");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize favorites");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pokedex-favorites-test-{}.json", name))
    }

    #[test]
    fn missing_file_starts_empty() {
        let path = temp_path("missing");
        fs::remove_file(&path).ok();
        let store = FavoritesStore::load(path);
        assert!(store.ids().is_empty());
    }

    #[test]
    fn toggle_twice_restores_original_set() {
        let path = temp_path("roundtrip");
        fs::remove_file(&path).ok();
        let mut store = FavoritesStore::load(path.clone());

        assert!(store.toggle(25));
        assert!(store.is_favorite(25));
        assert!(!store.toggle(25));
        assert!(!store.is_favorite(25));
        assert!(store.ids().is_empty());
        fs::remove_file(path).ok();
    }

    #[test]
    fn persisted_state_equals_in_memory_state_after_toggle() {
        let path = temp_path("writethrough");
        fs::remove_file(&path).ok();
        let mut store = FavoritesStore::load(path.clone());
        store.toggle(1);
        store.toggle(151);

        let reloaded = FavoritesStore::load(path.clone());
        assert_eq!(reloaded.ids(), store.ids());
        assert!(reloaded.is_favorite(1));
        assert!(reloaded.is_favorite(151));
        fs::remove_file(path).ok();
    }

    #[test]
    fn corrupt_file_is_discarded() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json at all").unwrap();
        let store = FavoritesStore::load(path.clone());
        assert!(store.ids().is_empty());
        fs::remove_file(path).ok();
    }
}
