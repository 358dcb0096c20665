//! Suggestion cache store.
//!
//! Zero or one entry per owner, persisted in `suggestions.json`. The row
//! is keyed on the owner, so concurrent writers collapse to
//! last-writer-wins — two racing regenerations can both call the model,
//! but they can never produce duplicate rows.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use fd_domain::Owner;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Suggestion entry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The cached advice list for one owner. `items` keeps insertion order:
/// full replace on regeneration, chronological append on extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub owner: Owner,
    pub items: Vec<String>,
    /// Set by the last full regeneration.
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Suggestion store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct SuggestionStore {
    inner: RwLock<HashMap<String, SuggestionEntry>>,
    persist_path: PathBuf,
}

impl SuggestionStore {
    pub fn new(state_path: &std::path::Path) -> Self {
        let persist_path = state_path.join("suggestions.json");

        let mut store = Self {
            inner: RwLock::new(HashMap::new()),
            persist_path,
        };
        store.load();
        store
    }

    fn load(&mut self) {
        if let Ok(data) = std::fs::read_to_string(&self.persist_path) {
            if let Ok(entries) = serde_json::from_str::<Vec<SuggestionEntry>>(&data) {
                let mut map = HashMap::new();
                for entry in entries {
                    map.insert(entry.owner.as_str().to_string(), entry);
                }
                let count = map.len();
                self.inner = RwLock::new(map);
                tracing::info!(count, "loaded suggestion caches from disk");
            }
        }
    }

    async fn persist(&self) {
        let map = self.inner.read().await;
        let entries: Vec<&SuggestionEntry> = map.values().collect();
        if let Ok(json) = serde_json::to_string_pretty(&entries) {
            let path = self.persist_path.clone();
            let _ = tokio::task::spawn_blocking(move || {
                if let Some(parent) = path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!(error = %e, "failed to persist suggestion caches");
                }
            })
            .await;
        }
    }

    pub async fn get(&self, owner: &Owner) -> Option<SuggestionEntry> {
        self.inner.read().await.get(owner.as_str()).cloned()
    }

    /// Full regeneration: replace (or create) the owner's entry with a new
    /// item list. Upsert on the owner key — last writer wins.
    pub async fn replace(&self, owner: &Owner, items: Vec<String>) -> SuggestionEntry {
        let now = Utc::now();
        let entry = SuggestionEntry {
            owner: owner.clone(),
            items,
            created_at: now,
            last_updated: now,
        };
        self.inner
            .write()
            .await
            .insert(owner.as_str().to_string(), entry.clone());
        self.persist().await;
        entry
    }

    /// Append one item, initializing an empty entry when absent. Returns
    /// `None` without mutating anything when a byte-identical item is
    /// already present — the check and the push happen under one write
    /// lock, so the list can never hold duplicates even under concurrent
    /// extension. `created_at` is untouched for existing entries — it
    /// tracks the last full regeneration, not extensions.
    pub async fn append_unique(&self, owner: &Owner, item: String) -> Option<SuggestionEntry> {
        let now = Utc::now();
        let entry = {
            let mut map = self.inner.write().await;
            let entry = map
                .entry(owner.as_str().to_string())
                .or_insert_with(|| SuggestionEntry {
                    owner: owner.clone(),
                    items: Vec::new(),
                    created_at: now,
                    last_updated: now,
                });
            if entry.items.contains(&item) {
                return None;
            }
            entry.items.push(item);
            entry.last_updated = now;
            entry.clone()
        };
        self.persist().await;
        Some(entry)
    }

    /// Invalidate the owner's cache. Returns whether an entry existed.
    pub async fn delete(&self, owner: &Owner) -> bool {
        let removed = self.inner.write().await.remove(owner.as_str()).is_some();
        if removed {
            self.persist().await;
        }
        removed
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_until_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        assert!(store.get(&Owner::new("u1")).await.is_none());
    }

    #[tokio::test]
    async fn replace_overwrites_the_whole_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        let owner = Owner::new("u1");

        store.replace(&owner, vec!["a".into(), "b".into()]).await;
        store.replace(&owner, vec!["c".into()]).await;

        let entry = store.get(&owner).await.unwrap();
        assert_eq!(entry.items, vec!["c".to_string()]);
    }

    #[tokio::test]
    async fn append_preserves_order_and_created_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        let owner = Owner::new("u1");

        let first = store.replace(&owner, vec!["a".into()]).await;
        let extended = store.append_unique(&owner, "b".into()).await.unwrap();

        assert_eq!(extended.items, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(extended.created_at, first.created_at);
    }

    #[tokio::test]
    async fn append_initializes_an_absent_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        let owner = Owner::new("u1");

        let entry = store.append_unique(&owner, "only".into()).await.unwrap();
        assert_eq!(entry.items, vec!["only".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_append_is_rejected_without_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        let owner = Owner::new("u1");

        store.replace(&owner, vec!["a".into()]).await;
        assert!(store.append_unique(&owner, "a".into()).await.is_none());
        assert_eq!(store.get(&owner).await.unwrap().items, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn delete_transitions_back_to_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        let owner = Owner::new("u1");

        store.replace(&owner, vec!["a".into()]).await;
        assert!(store.delete(&owner).await);
        assert!(store.get(&owner).await.is_none());
        assert!(!store.delete(&owner).await);
    }

    #[tokio::test]
    async fn entries_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let owner = Owner::new("u1");
        {
            let store = SuggestionStore::new(dir.path());
            store.replace(&owner, vec!["keep me".into()]).await;
        }
        let reloaded = SuggestionStore::new(dir.path());
        let entry = reloaded.get(&owner).await.unwrap();
        assert_eq!(entry.items, vec!["keep me".to_string()]);
    }
}
