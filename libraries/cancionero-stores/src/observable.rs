//! Observable value
//!
//! A single owned value plus a list of callbacks. Every `set`/`update`
//! notifies all subscribers with the new value, in subscription order.
//! Callbacks run after the value lock is released, so a callback may read
//! the store or unsubscribe itself. A callback must not `set` or `update`
//! the observable it is subscribed to.
//!
//! Each value carries a version. A subscriber never receives a value older
//! than one it has already seen, even when writers race on other threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Versioned<T> {
    version: u64,
    value: T,
}

struct Subscriber<T> {
    id: SubscriptionId,
    callback: Callback<T>,
    // Version of the last value handed to the callback
    delivered: Mutex<u64>,
}

impl<T> Subscriber<T> {
    fn deliver(&self, version: u64, value: &T) {
        let mut delivered = lock(&self.delivered);
        if version > *delivered {
            *delivered = version;
            (self.callback)(value);
        }
    }
}

/// A value that notifies subscribers on change.
pub struct Observable<T> {
    current: Mutex<Versioned<T>>,
    subscribers: Mutex<Vec<Arc<Subscriber<T>>>>,
    next_id: AtomicU64,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: Mutex::new(Versioned {
                version: 1,
                value: initial,
            }),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        lock(&self.current).value.clone()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.update(|_| value);
    }

    /// Replace the value with `f(current)` and notify subscribers.
    ///
    /// The transform runs under the value lock; it must not touch this
    /// observable.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let (version, snapshot) = {
            let mut current = lock(&self.current);
            current.value = f(&current.value);
            current.version += 1;
            (current.version, current.value.clone())
        };
        self.notify(version, &snapshot);
    }

    /// Register `callback`. It is called right away with the current value,
    /// then after every change until unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let subscriber = Arc::new(Subscriber {
            id,
            callback: Arc::new(callback),
            delivered: Mutex::new(0),
        });

        // Registered under the value lock so no later write can miss it
        let (version, snapshot) = {
            let current = lock(&self.current);
            lock(&self.subscribers).push(subscriber.clone());
            (current.version, current.value.clone())
        };

        subscriber.deliver(version, &snapshot);
        id
    }

    /// Remove a subscription. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = lock(&self.subscribers);
        let before = subscribers.len();
        subscribers.retain(|subscriber| subscriber.id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }

    fn notify(&self, version: u64, value: &T) {
        let subscribers: Vec<Arc<Subscriber<T>>> = lock(&self.subscribers).clone();

        for subscriber in subscribers {
            subscriber.deliver(version, value);
        }
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// A panicking subscriber must not brick the store
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
