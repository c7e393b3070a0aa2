//! Write-back of live values

use serde::Serialize;

use super::error::PersistError;
use super::record::PersistedRecord;
use crate::platform::Platform;

/// Stamp `value` with the current time and store it under `key`
pub fn try_persist<T: Serialize>(
    platform: &Platform,
    key: &str,
    value: &T,
) -> Result<(), PersistError> {
    let storage = platform.storage().ok_or(PersistError::StorageUnavailable)?;

    let record = PersistedRecord::new(value, platform.now());
    let json = serde_json::to_string(&record).map_err(PersistError::Encode)?;

    storage
        .set_item(key, &json)
        .map_err(|source| PersistError::WriteFailure {
            key: key.to_string(),
            source,
        })?;
    log::debug!("Saved '{}' ({} bytes)", key, json.len());
    Ok(())
}

/// Best-effort save: failures are logged and dropped, never retried
pub fn persist<T: Serialize>(platform: &Platform, key: &str, value: &T) {
    match try_persist(platform, key, value) {
        Ok(()) | Err(PersistError::StorageUnavailable) => {}
        Err(err) => log::warn!("{}", err),
    }
}

/// Remove a slot so the next load starts from defaults
pub fn clear(platform: &Platform, key: &str) {
    if let Some(storage) = platform.storage() {
        match storage.remove_item(key) {
            Ok(()) => log::info!("Cleared '{}'", key),
            Err(err) => log::warn!("Failed to clear '{}': {}", key, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{DefaultDescriptor, LoadState, inspect};
    use crate::platform::{FixedClock, MemoryStorage, StorageBackend};
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};
    use std::rc::Rc;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_persist_writes_stamped_record() {
        let storage = Rc::new(MemoryStorage::new());
        let platform = Platform::with_storage(storage.clone())
            .with_clock(Rc::new(FixedClock::new(at("2024-05-01T08:00:00Z"))));

        try_persist(&platform, "daily", &json!({"a": 2})).unwrap();

        let raw = storage.get_item("daily").unwrap().unwrap();
        let stored: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            stored,
            json!({"savedAt": "2024-05-01T08:00:00Z", "value": {"a": 2}})
        );
    }

    #[test]
    fn test_written_record_loads_fresh() {
        let storage = Rc::new(MemoryStorage::new());
        let platform = Platform::with_storage(storage)
            .with_clock(Rc::new(FixedClock::new(at("2024-05-01T08:00:00Z"))));
        let default = DefaultDescriptor::new(json!({"a": 0}), at("2023-07-07T04:34:21.229Z"));

        persist(&platform, "daily", &json!({"a": 4}));

        let resolution = inspect(&platform, "daily", &default).unwrap();
        assert_eq!(resolution.state, LoadState::Fresh);
        assert_eq!(resolution.value, json!({"a": 4}));
    }

    #[test]
    fn test_last_write_wins() {
        let storage = Rc::new(MemoryStorage::new());
        let platform = Platform::with_storage(storage.clone());

        persist(&platform, "daily", &1);
        persist(&platform, "daily", &2);
        persist(&platform, "daily", &3);

        let raw = storage.get_item("daily").unwrap().unwrap();
        let record: PersistedRecord<u32> = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.value, 3);
        assert_eq!(storage.write_count(), 3);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let storage = Rc::new(MemoryStorage::with_item("daily", "old"));
        storage.set_fail_writes(true);
        let platform = Platform::with_storage(storage.clone());

        assert!(matches!(
            try_persist(&platform, "daily", &json!({"a": 1})),
            Err(PersistError::WriteFailure { .. })
        ));
        // Does not panic, leaves the old entry alone
        persist(&platform, "daily", &json!({"a": 1}));
        assert_eq!(storage.get_item("daily").unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn test_headless_write_is_skipped() {
        let platform = Platform::headless();
        assert!(matches!(
            try_persist(&platform, "daily", &0),
            Err(PersistError::StorageUnavailable)
        ));
        persist(&platform, "daily", &0);
        clear(&platform, "daily");
    }

    #[test]
    fn test_clear_removes_slot() {
        let storage = Rc::new(MemoryStorage::new());
        let platform = Platform::with_storage(storage.clone());
        persist(&platform, "daily", &json!([true]));
        assert!(!storage.is_empty());

        clear(&platform, "daily");
        assert!(storage.is_empty());

        let default = DefaultDescriptor::new(json!([]), at("2023-01-01T00:00:00Z"));
        let resolution = inspect(&platform, "daily", &default).unwrap();
        assert_eq!(resolution.state, LoadState::NoRecord);
    }
}
