//! Load-time reconciliation of a persisted record with its default

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use super::error::PersistError;
use super::record::{DefaultDescriptor, PersistedRecord};
use crate::platform::Platform;

/// Where the resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No storage medium on this host
    Unavailable,
    /// Storage reachable but nothing saved under the key
    NoRecord,
    /// Record saved at or after the default was authored; used as-is
    Fresh,
    /// Record saved before the default was authored; discarded
    Stale,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Unavailable => "unavailable",
            LoadState::NoRecord => "no record",
            LoadState::Fresh => "fresh",
            LoadState::Stale => "stale",
        }
    }

    /// Whether the persisted value won
    pub fn uses_record(&self) -> bool {
        matches!(self, LoadState::Fresh)
    }
}

/// Outcome of reconciling one slot
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    pub value: T,
    pub state: LoadState,
    /// Effective save time of the record, if one was read
    pub saved_at: Option<DateTime<Utc>>,
}

impl<T: Clone> Resolution<T> {
    fn from_default(default: &DefaultDescriptor<T>, state: LoadState) -> Self {
        Self {
            value: default.value.clone(),
            state,
            saved_at: None,
        }
    }
}

/// A record is stale when it predates the default's last authored change
#[inline]
pub fn is_stale(saved_at: DateTime<Utc>, authored_at: DateTime<Utc>) -> bool {
    saved_at < authored_at
}

/// Reconcile `key` against its default, surfacing corrupt data as an error
///
/// Performs at most one storage read and never writes. A fresh record wins
/// entirely; a stale one is thrown away wholesale, so fields added to the
/// default only show up once `authored_at` moves past the saved stamp.
pub fn inspect<T>(
    platform: &Platform,
    key: &str,
    default: &DefaultDescriptor<T>,
) -> Result<Resolution<T>, PersistError>
where
    T: DeserializeOwned + Clone,
{
    let Some(storage) = platform.storage() else {
        return Ok(Resolution::from_default(default, LoadState::Unavailable));
    };

    let raw = storage
        .get_item(key)
        .map_err(|source| PersistError::Read {
            key: key.to_string(),
            source,
        })?;
    let Some(raw) = raw else {
        return Ok(Resolution::from_default(default, LoadState::NoRecord));
    };

    let record: PersistedRecord<T> =
        serde_json::from_str(&raw).map_err(|source| PersistError::CorruptPersistedData {
            key: key.to_string(),
            source,
        })?;
    let saved_at = record.saved_at.unwrap_or_else(|| platform.now());

    if is_stale(saved_at, default.authored_at) {
        Ok(Resolution {
            value: default.value.clone(),
            state: LoadState::Stale,
            saved_at: Some(saved_at),
        })
    } else {
        Ok(Resolution {
            value: record.value,
            state: LoadState::Fresh,
            saved_at: Some(saved_at),
        })
    }
}

/// Reconcile `key` against its default, always producing a usable value
///
/// Corrupt records and storage read errors fall back to the default.
pub fn resolve<T>(platform: &Platform, key: &str, default: &DefaultDescriptor<T>) -> T
where
    T: DeserializeOwned + Clone,
{
    match inspect(platform, key, default) {
        Ok(resolution) => {
            match resolution.state {
                LoadState::Fresh => log::info!("Loaded '{}' from storage", key),
                LoadState::Stale => log::info!("Saved '{}' predates current defaults, resetting", key),
                LoadState::NoRecord | LoadState::Unavailable => {
                    log::info!("Using default '{}' ({})", key, resolution.state.as_str())
                }
            }
            resolution.value
        }
        Err(err) => {
            log::warn!("{}; using default", err);
            default.value.clone()
        }
    }
}
