use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What lives in storage under a slot key
///
/// Older saves used `Time`/`Value` for the two fields; both spellings load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord<T> {
    /// When the record was written; a missing stamp counts as "now"
    #[serde(
        rename = "savedAt",
        alias = "Time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(alias = "Value")]
    pub value: T,
}

impl<T> PersistedRecord<T> {
    pub fn new(value: T, saved_at: DateTime<Utc>) -> Self {
        Self {
            saved_at: Some(saved_at),
            value,
        }
    }
}

/// A default value plus the moment its author last changed it
///
/// Bump `authored_at` whenever the shape or values of `value` change;
/// every record saved before that moment is then discarded on load.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultDescriptor<T> {
    pub value: T,
    pub authored_at: DateTime<Utc>,
}

impl<T> DefaultDescriptor<T> {
    pub fn new(value: T, authored_at: DateTime<Utc>) -> Self {
        Self { value, authored_at }
    }
}
