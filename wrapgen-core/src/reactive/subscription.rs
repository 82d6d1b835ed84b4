//! Subscription handles.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard returned by a subscribe call.
///
/// Dropping it removes the subscription.
pub struct Subscription {
    id: SubscriptionId,
    unsubscribe: Option<Box<dyn FnOnce(SubscriptionId) + Send + Sync>>,
}

impl Subscription {
    pub(crate) fn new<F>(id: SubscriptionId, unsubscribe: F) -> Self
    where
        F: FnOnce(SubscriptionId) + Send + Sync + 'static,
    {
        Self {
            id,
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
