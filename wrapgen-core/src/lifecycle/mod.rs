//! Component Lifecycle
//!
//! Runtime side of a generated wrapper: mounts the remote root component
//! once, keeps its parameters in sync with the host's properties, and
//! disposes it once after the host removes the wrapper.
//!
//! # Concepts
//!
//! ## Mount state
//!
//! Each wrapper instance owns a [`MountState`], an explicit state machine
//! (`Unmounted -> Mounting -> Idle <-> Updating -> Disposing -> Disposed`).
//! At most one set-parameters call is in flight per instance; snapshots that
//! arrive meanwhile wait in a single slot and the newest one wins.
//!
//! ## Merge policy
//!
//! Every notification carries the full property set, so overwriting the
//! waiting snapshot loses no key: the next update sends every key whose
//! newest value differs from the last acknowledged snapshot. A key that
//! changes and changes back while an update is in flight is not sent.
//!
//! ## Deferred disposal
//!
//! Unmounting waits for a configurable grace period first, trading dispose
//! latency for tolerance of hosts that detach and immediately re-attach.
//!
//! # Scheduling
//!
//! Work runs as Tokio tasks. Suspension points are the mount, each
//! set-parameters call, the dispose call, and the grace-period sleep. The
//! state lock is never held across any of them.

mod adapter;
mod binding;
mod render;
mod state;

pub use adapter::{ComponentAdapter, Scheduled};
pub use binding::{use_component, ComponentBinding};
pub use render::{Placeholder, RenderHandle, PLACEHOLDER_TAG};
pub use state::{MountFuture, MountState, PendingUpdate, Phase};
