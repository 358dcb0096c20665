//! Document repository.
//!
//! Persists per-user document records (metadata + summary) in
//! `documents.json` under the configured state path. Mutations write
//! through to disk so a record that was acknowledged survives a crash.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use fd_domain::error::{Error, Result};
use fd_domain::Owner;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Document record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One uploaded file: blob metadata plus the model-generated summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub owner: Owner,
    /// `"{owner}/{original filename}"` — locates the blob in the object store.
    pub storage_key: String,
    pub display_name: String,
    pub uploaded_at: DateTime<Utc>,
    /// Absent until summarization succeeds.
    #[serde(default)]
    pub summary: Option<String>,
    /// Best-effort, extracted from the filename at ingestion.
    #[serde(default)]
    pub year: Option<i32>,
    /// Free-text classification (e.g. "W2", "1099"). Never auto-derived.
    #[serde(default)]
    pub document_type: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Listing filter
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Listing filter: by year, by year+month (half-open ranges), and/or by
/// case-insensitive substring on the display name.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub search: Option<String>,
}

impl DocumentFilter {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.search.is_none()
    }

    /// Resolve the `[start, end)` upload-time range, if any.
    fn date_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => {
                let start = month_start(year, month)?;
                let end = if month == 12 {
                    month_start(year + 1, 1)?
                } else {
                    month_start(year, month + 1)?
                };
                Ok(Some((start, end)))
            }
            (Some(year), None) => Ok(Some((month_start(year, 1)?, month_start(year + 1, 1)?))),
            (None, Some(_)) => Err(Error::Validation(
                "month filter requires a year".into(),
            )),
            (None, None) => Ok(None),
        }
    }
}

fn month_start(year: i32, month: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::Validation(format!("invalid month: {month}")))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Document store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct DocumentStore {
    inner: RwLock<HashMap<Uuid, DocumentRecord>>,
    persist_path: PathBuf,
}

impl DocumentStore {
    pub fn new(state_path: &std::path::Path) -> Self {
        let persist_path = state_path.join("documents.json");

        let mut store = Self {
            inner: RwLock::new(HashMap::new()),
            persist_path,
        };
        store.load();
        store
    }

    fn load(&mut self) {
        if let Ok(data) = std::fs::read_to_string(&self.persist_path) {
            if let Ok(records) = serde_json::from_str::<Vec<DocumentRecord>>(&data) {
                let mut map = HashMap::new();
                for record in records {
                    map.insert(record.id, record);
                }
                let count = map.len();
                self.inner = RwLock::new(map);
                tracing::info!(count, "loaded document records from disk");
            }
        }
    }

    async fn persist(&self) {
        let map = self.inner.read().await;
        let records: Vec<&DocumentRecord> = map.values().collect();
        if let Ok(json) = serde_json::to_string_pretty(&records) {
            let path = self.persist_path.clone();
            // Spawn blocking to avoid blocking the Tokio executor.
            let _ = tokio::task::spawn_blocking(move || {
                if let Some(parent) = path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!(error = %e, "failed to persist document records");
                }
            })
            .await;
        }
    }

    pub async fn insert(&self, record: DocumentRecord) -> DocumentRecord {
        self.inner.write().await.insert(record.id, record.clone());
        self.persist().await;
        record
    }

    /// List an owner's records. An empty filter returns everything in the
    /// repository's natural (arbitrary) order; when any filter is present
    /// the result is sorted newest-first by upload time — an explicit
    /// contract, not an accident of storage order.
    pub async fn list_filtered(
        &self,
        owner: &Owner,
        filter: &DocumentFilter,
    ) -> Result<Vec<DocumentRecord>> {
        let range = filter.date_range()?;
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());

        let mut records: Vec<DocumentRecord> = self
            .inner
            .read()
            .await
            .values()
            .filter(|r| &r.owner == owner)
            .filter(|r| match &range {
                Some((start, end)) => r.uploaded_at >= *start && r.uploaded_at < *end,
                None => true,
            })
            .filter(|r| match &needle {
                Some(needle) => r.display_name.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();

        if !filter.is_empty() {
            records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        }
        Ok(records)
    }

    /// All of an owner's summaries, natural order. Records whose
    /// summarization failed contribute nothing.
    pub async fn summaries(&self, owner: &Owner) -> Vec<String> {
        self.inner
            .read()
            .await
            .values()
            .filter(|r| &r.owner == owner)
            .filter_map(|r| r.summary.clone())
            .collect()
    }

    /// Look up a record, enforcing ownership. A record owned by someone
    /// else is indistinguishable from a missing one.
    pub async fn get_owned(&self, owner: &Owner, id: &Uuid) -> Option<DocumentRecord> {
        self.inner
            .read()
            .await
            .get(id)
            .filter(|r| &r.owner == owner)
            .cloned()
    }

    /// Remove a record, enforcing ownership. Returns the removed record.
    pub async fn delete(&self, owner: &Owner, id: &Uuid) -> Option<DocumentRecord> {
        let mut map = self.inner.write().await;
        if map.get(id).is_some_and(|r| &r.owner == owner) {
            let removed = map.remove(id);
            drop(map);
            self.persist().await;
            removed
        } else {
            None
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn record(owner: &str, name: &str, uploaded_at: DateTime<Utc>) -> DocumentRecord {
        DocumentRecord {
            id: Uuid::new_v4(),
            owner: Owner::new(owner),
            storage_key: format!("{owner}/{name}"),
            display_name: name.to_string(),
            uploaded_at,
            summary: Some("a summary".into()),
            year: None,
            document_type: None,
        }
    }

    fn ts(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    #[tokio::test]
    async fn year_and_month_filters_use_half_open_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let owner = Owner::new("u1");

        store.insert(record("u1", "april.txt", ts("2023-04-30T23:59:59Z"))).await;
        store.insert(record("u1", "may_first.txt", ts("2023-05-01T00:00:00Z"))).await;
        store.insert(record("u1", "may_last.txt", ts("2023-05-31T23:59:59Z"))).await;
        store.insert(record("u1", "june.txt", ts("2023-06-01T00:00:00Z"))).await;
        store.insert(record("u1", "other_year.txt", ts("2024-05-15T12:00:00Z"))).await;

        let filter = DocumentFilter { year: Some(2023), month: Some(5), search: None };
        let may = store.list_filtered(&owner, &filter).await.unwrap();
        let names: Vec<&str> = may.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["may_last.txt", "may_first.txt"]);
        for r in &may {
            assert!(r.uploaded_at >= ts("2023-05-01T00:00:00Z"));
            assert!(r.uploaded_at < ts("2023-06-01T00:00:00Z"));
        }

        let filter = DocumentFilter { year: Some(2023), month: None, search: None };
        let year = store.list_filtered(&owner, &filter).await.unwrap();
        assert_eq!(year.len(), 4);
    }

    #[tokio::test]
    async fn december_range_rolls_into_next_year() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let owner = Owner::new("u1");

        store.insert(record("u1", "dec.txt", ts("2023-12-31T23:00:00Z"))).await;
        store.insert(record("u1", "jan.txt", ts("2024-01-01T00:00:00Z"))).await;

        let filter = DocumentFilter { year: Some(2023), month: Some(12), search: None };
        let dec = store.list_filtered(&owner, &filter).await.unwrap();
        assert_eq!(dec.len(), 1);
        assert_eq!(dec[0].display_name, "dec.txt");
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let owner = Owner::new("u1");

        store.insert(record("u1", "W2_2023_final.txt", ts("2023-02-01T00:00:00Z"))).await;
        store.insert(record("u1", "receipt.pdf", ts("2023-03-01T00:00:00Z"))).await;

        let filter = DocumentFilter { year: None, month: None, search: Some("w2".into()) };
        let hits = store.list_filtered(&owner, &filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name, "W2_2023_final.txt");
    }

    #[tokio::test]
    async fn filtered_results_are_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let owner = Owner::new("u1");

        store.insert(record("u1", "old.txt", ts("2023-01-01T00:00:00Z"))).await;
        store.insert(record("u1", "newer.txt", ts("2023-06-01T00:00:00Z"))).await;
        store.insert(record("u1", "newest.txt", ts("2023-12-01T00:00:00Z"))).await;

        let filter = DocumentFilter { year: Some(2023), month: None, search: None };
        let records = store.list_filtered(&owner, &filter).await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["newest.txt", "newer.txt", "old.txt"]);
    }

    #[tokio::test]
    async fn month_without_year_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let filter = DocumentFilter { year: None, month: Some(5), search: None };
        let err = store
            .list_filtered(&Owner::new("u1"), &filter)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn invalid_month_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let filter = DocumentFilter { year: Some(2023), month: Some(13), search: None };
        let err = store
            .list_filtered(&Owner::new("u1"), &filter)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn ownership_is_enforced_on_get_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let theirs = store
            .insert(record("u2", "private.txt", ts("2023-01-01T00:00:00Z")))
            .await;

        let intruder = Owner::new("u1");
        assert!(store.get_owned(&intruder, &theirs.id).await.is_none());
        assert!(store.delete(&intruder, &theirs.id).await.is_none());
        // Still there for the rightful owner.
        assert!(store.get_owned(&Owner::new("u2"), &theirs.id).await.is_some());
    }

    #[tokio::test]
    async fn records_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let owner = Owner::new("u1");
        let id = {
            let store = DocumentStore::new(dir.path());
            store
                .insert(record("u1", "w2.txt", ts("2023-01-01T00:00:00Z")))
                .await
                .id
        };

        let reloaded = DocumentStore::new(dir.path());
        let found = reloaded.get_owned(&owner, &id).await.unwrap();
        assert_eq!(found.display_name, "w2.txt");
        assert_eq!(found.summary.as_deref(), Some("a summary"));
    }

    #[tokio::test]
    async fn summaries_skip_unsummarized_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let owner = Owner::new("u1");

        let mut unsummarized = record("u1", "failed.txt", ts("2023-01-01T00:00:00Z"));
        unsummarized.summary = None;
        store.insert(unsummarized).await;
        store.insert(record("u1", "ok.txt", ts("2023-01-02T00:00:00Z"))).await;

        assert_eq!(store.summaries(&owner).await, vec!["a summary".to_string()]);
    }
}
