//! The "daily" checklist slot

use chrono::{DateTime, Utc};

use crate::checklist::{Checklist, Task};
use crate::persistence::DefaultDescriptor;
use crate::platform::Platform;
use crate::store::{self, Writable};

/// LocalStorage key
pub const KEY: &str = "daily";

/// Last change to [`daily_default`], 2023-07-07T04:34:21.229Z.
/// Bump whenever the task list changes so stale saves get replaced.
pub const LAST_UPDATE_MS: i64 = 1_688_704_461_229;

pub fn last_update() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(LAST_UPDATE_MS).unwrap_or_default()
}

/// Default daily tasks
pub fn daily_default() -> DefaultDescriptor<Checklist> {
    let tasks = vec![
        Task::number("Bounty", 4),
        Task::number("Training", 2),
        Task::number("Mirroria Fun Zone", 8),
        Task::boolean("Artificial Island Resource", "Claim"),
        Task::boolean_list(
            "Gift",
            &[
                "[Aesperia] Banges: Black Market",
                "[Aesperia] Navia: Cetus Island",
            ],
        ),
        Task::number_with_buttons("Support Points", 1500, &[100, 150, 250, 375, 500]),
        Task::number_with_buttons("Return Support Points", 600, &[50, 100]),
    ];
    DefaultDescriptor::new(Checklist::new(tasks), last_update())
}

/// Live daily store, loaded from and saved to [`KEY`]
pub fn daily(platform: &Platform) -> Writable<Checklist> {
    store::persisted(platform, KEY, &daily_default())
}
