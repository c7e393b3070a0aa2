//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Time (`Date.now()` on web, system clock on native)
//!
//! Everything that touches the host goes through a [`Platform`], so the
//! persistence code never reaches for `window` itself.

pub mod storage;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::rc::Rc;

use chrono::{DateTime, Utc};

pub use storage::{MemoryStorage, StorageBackend, StorageError};
pub use time::{Clock, FixedClock, SystemClock};
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

/// Host capabilities available to the persistence layer
///
/// A platform without storage is the headless mode: every slot resolves to
/// its default and writes are skipped.
#[derive(Clone)]
pub struct Platform {
    storage: Option<Rc<dyn StorageBackend>>,
    clock: Rc<dyn Clock>,
}

impl Platform {
    /// Platform backed by the given storage and the system clock
    pub fn with_storage(storage: Rc<dyn StorageBackend>) -> Self {
        Self {
            storage: Some(storage),
            clock: Rc::new(SystemClock),
        }
    }

    /// Platform with no storage medium (native, SSR, tests)
    pub fn headless() -> Self {
        Self {
            storage: None,
            clock: Rc::new(SystemClock),
        }
    }

    /// Replace the clock (tests pin "now" with [`FixedClock`])
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Detect the host: LocalStorage when a browser window exposes it
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        match LocalStorage::from_window() {
            Some(storage) => {
                log::info!("Using window.localStorage");
                Self::with_storage(Rc::new(storage))
            }
            None => {
                log::warn!("LocalStorage not available, running headless");
                Self::headless()
            }
        }
    }

    /// Native builds never have a browser context
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Self::headless()
    }

    /// Whether a storage medium is reachable
    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    pub fn storage(&self) -> Option<&dyn StorageBackend> {
        self.storage.as_deref()
    }

    /// Current time according to the platform clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("has_storage", &self.has_storage())
            .field("now", &self.now())
            .finish()
    }
}
