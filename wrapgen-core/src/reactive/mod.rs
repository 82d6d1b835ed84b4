//! Reactive Properties
//!
//! The host side of property change detection. A [`PropsSource`] holds the
//! current property snapshot of one wrapper instance and notifies its
//! subscribers whenever the host sets a new one.
//!
//! # Implementation Notes
//!
//! Unlike fine-grained reactive systems, there is no implicit dependency
//! tracking here. The host integration calls `set` when it observes new
//! values, and the subscriber (the lifecycle adapter) diffs the snapshot
//! itself. Subscriptions are guard objects; dropping one unsubscribes.

mod props_source;
mod subscription;

pub use props_source::PropsSource;
pub use subscription::{Subscription, SubscriptionId};
