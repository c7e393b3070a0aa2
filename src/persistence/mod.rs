//! Versioned persistence for default-backed state
//!
//! Features:
//! - Timestamped JSON envelope (`savedAt` + `value`)
//! - Staleness check against the default's authorship moment
//! - Full replacement of stale records (no field merge)
//! - Corruption detection with fallback to defaults
//! - Best-effort write-back

mod error;
mod reconcile;
mod record;
mod write;

pub use error::PersistError;
pub use reconcile::{LoadState, Resolution, inspect, is_stale, resolve};
pub use record::{DefaultDescriptor, PersistedRecord};
pub use write::{clear, persist, try_persist};
