//! Dailies entry point
//!
//! Handles platform-specific initialization and boots the persisted stores.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use dailies::consts::WEB_LOG_LEVEL;
    use dailies::daily;
    use dailies::{Checklist, Platform, Writable};

    thread_local! {
        static DAILY: RefCell<Option<Writable<Checklist>>> = const { RefCell::new(None) };
    }

    fn with_daily(f: impl FnOnce(&Writable<Checklist>)) {
        DAILY.with(|slot| {
            if let Some(store) = slot.borrow().as_ref() {
                f(store);
            }
        });
    }

    /// Current daily checklist as JSON
    #[wasm_bindgen]
    pub fn daily_json() -> String {
        let mut json = String::from("[]");
        with_daily(|store| {
            if let Ok(s) = store.with(|list| serde_json::to_string(list)) {
                json = s;
            }
        });
        json
    }

    /// Bump a counter task by `amount`
    #[wasm_bindgen]
    pub fn daily_add(name: &str, amount: u32) {
        with_daily(|store| {
            store.update(|list| {
                if let Some(task) = list.task_mut(name) {
                    task.add(amount);
                }
            })
        });
    }

    /// Flip a checkbox task
    #[wasm_bindgen]
    pub fn daily_toggle(name: &str, index: usize) {
        with_daily(|store| {
            store.update(|list| {
                if let Some(task) = list.task_mut(name) {
                    task.toggle(index);
                }
            })
        });
    }

    /// Clear all progress
    #[wasm_bindgen]
    pub fn daily_reset() {
        with_daily(|store| store.update(Checklist::reset_all));
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(WEB_LOG_LEVEL).expect("Failed to init logger");

        log::info!("Dailies starting...");

        let platform = Platform::detect();
        let store = daily::daily(&platform);
        let (done, total) = store.with(Checklist::completed);
        log::info!("Daily checklist ready ({}/{} done)", done, total);

        DAILY.with(|slot| *slot.borrow_mut() = Some(store));
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dailies::Platform;
    use dailies::daily;

    env_logger::init();
    log::info!("Dailies (native) starting...");
    log::info!("No browser storage on native - run with `trunk serve` for persistence");

    let platform = Platform::detect();
    let store = daily::daily(&platform);
    let (done, total) = store.with(|list| list.completed());
    log::info!("Daily checklist: {}/{} done", done, total);

    match store.with(|list| serde_json::to_string_pretty(list)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode checklist: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
