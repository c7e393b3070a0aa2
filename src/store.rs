//! Reactive value container with write-back persistence
//!
//! A [`Writable`] holds one value and notifies subscribers whenever it
//! changes. [`persisted`] seeds one from storage and subscribes a writer that
//! saves every change back under the same key.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::persistence::{self, DefaultDescriptor};
use crate::platform::Platform;

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// Handle returned by [`Writable::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(Subscription, Subscriber<T>)>>,
    next_id: RefCell<u64>,
}

/// Shared, observable value
///
/// Clones share the same state. Subscribers must not write back into the
/// store they are called from.
pub struct Writable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Writable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: RefCell::new(0),
            }),
        }
    }

    /// Borrow the current value
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.inner.value.borrow())
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Mutate the value in place and notify subscribers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.inner.value.borrow_mut());
        self.notify();
    }

    /// Register a subscriber; it runs immediately with the current value
    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> Subscription {
        let mut f: Subscriber<T> = Box::new(f);
        f(&*self.inner.value.borrow());

        let id = {
            let mut next = self.inner.next_id.borrow_mut();
            let id = Subscription(*next);
            *next += 1;
            id
        };
        self.inner.subscribers.borrow_mut().push((id, f));
        id
    }

    /// Drop a subscriber; returns false if it was already gone
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != subscription);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self) {
        let value = self.inner.value.borrow();
        for (_, subscriber) in self.inner.subscribers.borrow_mut().iter_mut() {
            subscriber(&*value);
        }
    }
}

impl<T: Clone> Writable<T> {
    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writable")
            .field("value", &self.inner.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Build a store for `key`, seeded from storage and saved on every change
///
/// The slot is read exactly once, before the store exists. On a headless
/// platform the store starts from the default and nothing is written.
pub fn persisted<T>(platform: &Platform, key: &str, default: &DefaultDescriptor<T>) -> Writable<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    let store = Writable::new(persistence::resolve(platform, key, default));

    if platform.has_storage() {
        let platform = platform.clone();
        let key = key.to_string();
        store.subscribe(move |value| persistence::persist(&platform, &key, value));
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{LoadState, PersistedRecord, inspect};
    use crate::platform::{FixedClock, MemoryStorage, StorageBackend};
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn stored(storage: &MemoryStorage, key: &str) -> PersistedRecord<Value> {
        let raw = storage.get_item(key).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_subscribe_runs_immediately_and_on_change() {
        let store = Writable::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&seen);
        store.subscribe(move |v| log.borrow_mut().push(*v));
        store.set(2);
        store.update(|v| *v += 10);

        assert_eq!(*seen.borrow(), vec![1, 2, 12]);
        assert_eq!(store.get(), 12);
    }

    #[test]
    fn test_subscribers_run_in_registration_order() {
        let store = Writable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second"] {
            let order = Rc::clone(&order);
            store.subscribe(move |_| order.borrow_mut().push(name));
        }
        order.borrow_mut().clear();
        store.set(1);

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let store = Writable::new(0);
        let count = Rc::new(RefCell::new(0));

        let c = Rc::clone(&count);
        let sub = store.subscribe(move |_| *c.borrow_mut() += 1);
        assert_eq!(store.subscriber_count(), 1);

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.set(5);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_clones_share_state() {
        let a = Writable::new(String::from("x"));
        let b = a.clone();
        b.set("y".to_string());
        assert_eq!(a.get(), "y");
        assert_eq!(a.with(|s| s.len()), 1);
    }

    #[test]
    fn test_persisted_reads_once_and_writes_every_change() {
        let storage = Rc::new(MemoryStorage::with_item(
            "daily",
            r#"{"savedAt":"2024-01-01T00:00:00Z","value":{"a":5}}"#,
        ));
        let platform = Platform::with_storage(storage.clone())
            .with_clock(Rc::new(FixedClock::new(at("2024-06-01T00:00:00Z"))));
        let default = DefaultDescriptor::new(json!({"a": 0}), at("2023-07-07T04:34:21.229Z"));

        let store = persisted(&platform, "daily", &default);
        assert_eq!(store.get(), json!({"a": 5}));
        assert_eq!(storage.read_count(), 1);
        // Subscribing writes the loaded value straight back
        assert_eq!(storage.write_count(), 1);

        store.set(json!({"a": 6}));
        store.update(|v| v["a"] = json!(7));
        assert_eq!(storage.read_count(), 1);
        assert_eq!(storage.write_count(), 3);

        let record = stored(&storage, "daily");
        assert_eq!(record.value, json!({"a": 7}));
        assert_eq!(record.saved_at, Some(at("2024-06-01T00:00:00Z")));
    }

    #[test]
    fn test_persisted_stale_record_is_overwritten_with_default() {
        let storage = Rc::new(MemoryStorage::with_item(
            "daily",
            r#"{"savedAt":"2022-01-01T00:00:00Z","value":{"a":5}}"#,
        ));
        let platform = Platform::with_storage(storage.clone())
            .with_clock(Rc::new(FixedClock::new(at("2024-06-01T00:00:00Z"))));
        let default = DefaultDescriptor::new(json!({"a": 0}), at("2023-07-07T04:34:21.229Z"));

        let store = persisted(&platform, "daily", &default);
        assert_eq!(store.get(), json!({"a": 0}));
        assert_eq!(stored(&storage, "daily").value, json!({"a": 0}));

        // Next load sees the rewritten record as fresh
        let resolution = inspect(&platform, "daily", &default).unwrap();
        assert_eq!(resolution.state, LoadState::Fresh);
    }

    #[test]
    fn test_persisted_headless_never_writes() {
        let platform = Platform::headless();
        let default = DefaultDescriptor::new(json!({"a": 0}), at("2023-07-07T04:34:21.229Z"));

        let store = persisted(&platform, "daily", &default);
        assert_eq!(store.get(), json!({"a": 0}));
        assert_eq!(store.subscriber_count(), 0);
        store.set(json!({"a": 1}));
        assert_eq!(store.get(), json!({"a": 1}));
    }

    #[test]
    fn test_persisted_survives_write_failures() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_fail_writes(true);
        let platform = Platform::with_storage(storage.clone());
        let default = DefaultDescriptor::new(json!({"a": 0}), at("2023-07-07T04:34:21.229Z"));

        let store = persisted(&platform, "daily", &default);
        store.set(json!({"a": 3}));

        assert_eq!(store.get(), json!({"a": 3}));
        assert!(storage.is_empty());
    }
}
