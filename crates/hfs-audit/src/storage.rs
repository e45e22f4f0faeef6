//! Report Storage
//!
//! Key/value persistence shaped like Web Storage (`localStorage`).

use std::collections::HashMap;

use crate::{AuditReport, StorageError};

/// Key the latest report is stored under
pub const REPORT_STORAGE_KEY: &str = "accessibilityReport";

/// Default per-origin quota of browser local storage
const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// String key/value store
pub trait ReportStore {
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn get_item(&self, key: &str) -> Option<String>;
}

/// In-memory store with a byte quota
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: usize,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self { items: HashMap::new(), quota }
    }

    /// Bytes used by keys and values
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ReportStore for MemoryStorage {
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let replaced = self.items.get(key).map_or(0, |old| key.len() + old.len());
        let size = key.len() + value.len();
        if self.used_bytes() - replaced + size > self.quota {
            return Err(StorageError::QuotaExceeded { key: key.to_string(), size });
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}

/// Store `report` under [`REPORT_STORAGE_KEY`]
pub fn persist_report(store: &mut impl ReportStore, report: &AuditReport) -> Result<(), StorageError> {
    let json = serde_json::to_string(report).map_err(StorageError::Serialize)?;
    store.set_item(REPORT_STORAGE_KEY, &json)?;
    tracing::debug!("report persisted under {REPORT_STORAGE_KEY:?} ({} bytes)", json.len());
    Ok(())
}

/// Load the last persisted report, `Ok(None)` if there is none
pub fn load_report(store: &impl ReportStore) -> Result<Option<AuditReport>, StorageError> {
    store
        .get_item(REPORT_STORAGE_KEY)
        .map(|json| serde_json::from_str(&json).map_err(StorageError::Corrupt))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate_at;

    #[test]
    fn test_persist_and_load() {
        let mut store = MemoryStorage::new();
        assert!(load_report(&store).unwrap().is_none());

        let report = aggregate_at(&[], 42);
        persist_report(&mut store, &report).unwrap();
        assert_eq!(load_report(&store).unwrap(), Some(report));
        assert!(store.get_item(REPORT_STORAGE_KEY).is_some());
    }

    #[test]
    fn test_quota_exceeded() {
        let mut store = MemoryStorage::with_quota(16);
        let err = persist_report(&mut store, &aggregate_at(&[], 0)).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_overwrite_counts_once() {
        let mut store = MemoryStorage::with_quota(10);
        store.set_item("k", "12345678").unwrap();
        store.set_item("k", "87654321").unwrap();
        assert_eq!(store.used_bytes(), 9);
    }

    #[test]
    fn test_corrupt_report() {
        let mut store = MemoryStorage::new();
        store.set_item(REPORT_STORAGE_KEY, "{not json").unwrap();
        assert!(matches!(load_report(&store), Err(StorageError::Corrupt(_))));
    }
}
