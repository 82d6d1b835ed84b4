//! Props Source
//!
//! The host framework's current property snapshot for one wrapper instance.
//!
//! # How It Works
//!
//! 1. The host integration creates a source with the initial properties.
//!
//! 2. Interested parties (the lifecycle adapter) subscribe with a callback.
//!
//! 3. Every `set` replaces the snapshot and invokes the subscribers in
//!    registration order with the new snapshot.
//!
//! There is no automatic dependency tracking: whoever owns the host binding
//! calls `set` when it observes new values, and subscribers decide for
//! themselves what changed.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;

use super::subscription::{Subscription, SubscriptionId};
use crate::interop::PropertyMap;

type Notifier = Arc<dyn Fn(&PropertyMap) + Send + Sync>;

/// Shared, clonable holder of the current properties.
///
/// # Example
///
/// ```rust
/// use wrapgen_core::props;
/// use wrapgen_core::reactive::PropsSource;
///
/// let source = PropsSource::new(props! { "count" => 0 });
/// let _sub = source.subscribe(|props| println!("now {:?}", props));
/// source.set(props! { "count" => 1 });
/// ```
#[derive(Clone)]
pub struct PropsSource {
    /// The current snapshot.
    value: Arc<RwLock<PropertyMap>>,

    /// Subscriber callbacks in registration order.
    notifiers: Arc<RwLock<Vec<(SubscriptionId, Notifier)>>>,
}

impl PropsSource {
    pub fn new(initial: PropertyMap) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            notifiers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A copy of the current snapshot.
    pub fn get(&self) -> PropertyMap {
        self.value.read().clone()
    }

    /// Replace the snapshot and notify subscribers.
    pub fn set(&self, props: PropertyMap) {
        *self.value.write() = props.clone();
        self.notify_subscribers(&props);
    }

    /// Derive a new snapshot from the current one.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&PropertyMap) -> PropertyMap,
    {
        let next = {
            let guard = self.value.read();
            f(&guard)
        };
        self.set(next);
    }

    /// Register `notify` to run after every `set`.
    ///
    /// Dropping the returned guard unsubscribes.
    pub fn subscribe<F>(&self, notify: F) -> Subscription
    where
        F: Fn(&PropertyMap) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.notifiers.write().push((id, Arc::new(notify)));

        let notifiers = Arc::downgrade(&self.notifiers);
        Subscription::new(id, move |id| {
            if let Some(notifiers) = notifiers.upgrade() {
                notifiers.write().retain(|(sub, _)| *sub != id);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifiers.read().len()
    }

    /// Deliver `snapshot`, the value this `set` wrote, not whatever a
    /// concurrent `set` stored since.
    fn notify_subscribers(&self, snapshot: &PropertyMap) {
        // Copy the list so callbacks may call `get`, `set` or unsubscribe.
        let notifiers: Vec<Notifier> = self
            .notifiers
            .read()
            .iter()
            .map(|(_, notify)| Arc::clone(notify))
            .collect();

        for notify in notifiers {
            notify(snapshot);
        }
    }
}

impl Debug for PropsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropsSource")
            .field("value", &self.get())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interop::PropValue;
    use crate::props;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn get_and_set() {
        let source = PropsSource::new(props! { "a" => 1 });
        assert_eq!(source.get().len(), 1);

        source.set(props! { "a" => 2, "b" => "x" });
        assert_eq!(source.get().len(), 2);
    }

    #[test]
    fn update_derives_from_current() {
        let source = PropsSource::new(props! { "a" => 1 });
        source.update(|current| {
            let mut next = current.clone();
            next.insert("b".into(), true.into());
            next
        });
        assert!(source.get().contains_key("b"));
    }

    #[test]
    fn notifies_subscribers_with_snapshot() {
        let source = PropsSource::new(props! {});
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();

        let _sub = source.subscribe(move |props| {
            seen_clone.store(props.len(), Ordering::SeqCst);
        });

        source.set(props! { "a" => 1, "b" => 2 });
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let source = PropsSource::new(props! {});
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let sub = source.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        source.set(props! { "a" => 1 });
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(sub);
        assert_eq!(source.subscriber_count(), 0);
        source.set(props! { "a" => 2 });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clone_shares_state() {
        let first = PropsSource::new(props! {});
        let second = first.clone();

        first.set(props! { "a" => 1 });
        assert_eq!(second.get().len(), 1);
    }

    #[test]
    fn concurrent_sets_each_deliver_their_own_snapshot() {
        let source = PropsSource::new(props! {});
        let delivered = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = delivered.clone();

        let _sub = source.subscribe(move |props| {
            if let Some(PropValue::Number(n)) = props.get("n") {
                sink.lock().push(*n as i32);
            }
        });

        let threads: Vec<_> = (0..8i32)
            .map(|n| {
                let source = source.clone();
                std::thread::spawn(move || source.set(props! { "n" => n }))
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        // Every value arrives exactly once, whatever the interleaving.
        let mut seen = delivered.lock().clone();
        seen.sort();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn subscriber_may_read_source() {
        let source = PropsSource::new(props! {});
        let reader = source.clone();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();

        let _sub = source.subscribe(move |_| {
            seen_clone.store(reader.get().len(), Ordering::SeqCst);
        });
        source.set(props! { "x" => 1 });
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
