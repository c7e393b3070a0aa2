//! Dailies - a daily checklist tracker
//!
//! Core modules:
//! - `persistence`: Versioned save/load with staleness checks
//! - `platform`: Browser/native platform abstraction (storage, clock)
//! - `store`: Reactive value container with write-back
//! - `checklist`: Task data model
//! - `daily`: The built-in "daily" slot

pub mod checklist;
pub mod daily;
pub mod persistence;
pub mod platform;
pub mod store;

pub use checklist::{Checklist, Task, TaskKind};
pub use persistence::{DefaultDescriptor, LoadState, PersistError, PersistedRecord, resolve};
pub use platform::{MemoryStorage, Platform, StorageBackend};
pub use store::Writable;

/// Application configuration constants
pub mod consts {
    /// Console log level for the web build (native uses `RUST_LOG`)
    pub const WEB_LOG_LEVEL: log::Level = log::Level::Info;
}
