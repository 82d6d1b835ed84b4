//! Mount State
//!
//! The per-instance state machine behind a
//! [`ComponentAdapter`](super::ComponentAdapter):
//!
//! ```text
//! Unmounted -> Mounting -> Idle <-> Updating
//!                 |          \         |
//!               Failed        +--> Disposing -> Disposed
//! ```
//!
//! All transitions are synchronous methods on [`MountState`]; the adapter
//! calls them under a lock and performs the remote calls they ask for
//! outside of it. Keeping the decisions here means the one-outstanding-update
//! rule depends on `phase`, not on the order in which futures happen to
//! complete.

use std::fmt;
use std::sync::Arc;

use futures_util::future::{BoxFuture, Shared};

use crate::error::InteropError;
use crate::interop::{changed_properties, PropertyMap, RemoteComponent};

/// The shared, not-yet-awaited (or already resolved) mount of the remote
/// instance. Every continuation that needs the handle awaits a clone.
pub type MountFuture = Shared<BoxFuture<'static, Result<Arc<dyn RemoteComponent>, InteropError>>>;

/// Where an adapter is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No placeholder has been attached yet.
    Unmounted,
    /// The add-root-component call is in flight.
    Mounting,
    /// Mounted with no update in flight.
    Idle,
    /// A set-parameters call is in flight.
    Updating,
    /// The dispose call is in flight.
    Disposing,
    /// Terminal. Reached after dispose, or when disposal found nothing to
    /// dispose.
    Disposed,
    /// Terminal. The mount was rejected.
    Failed,
}

impl Phase {
    /// True while the remote side has a call from this instance in flight
    /// that blocks new updates.
    pub fn has_pending_update(self) -> bool {
        matches!(self, Phase::Mounting | Phase::Updating)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An update the state machine has committed to sending.
#[derive(Debug, Clone)]
pub struct PendingUpdate {
    /// Only the keys that differ from the last sent snapshot.
    pub changed: PropertyMap,
    /// The full snapshot that becomes `last_sent` once acknowledged.
    pub snapshot: PropertyMap,
}

/// Mutable lifecycle state of one adapter instance.
pub struct MountState {
    phase: Phase,

    /// Set exactly once, on the first attach.
    pending_mount: Option<MountFuture>,

    /// The last snapshot acknowledged by (or initially mounted on) the
    /// remote instance.
    last_sent: PropertyMap,

    /// Newest snapshot observed but not yet compared. A later notification
    /// overwrites it.
    latest: Option<PropertyMap>,

    /// Monotonic; once set no remote call other than the single dispose is
    /// issued.
    is_disposed: bool,

    /// Bumped on every re-attach so a pending deferred disposal can tell it
    /// was superseded.
    unmount_generation: u64,
}

impl MountState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unmounted,
            pending_mount: None,
            last_sent: PropertyMap::new(),
            latest: None,
            is_disposed: false,
            unmount_generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.is_disposed
    }

    pub fn last_sent(&self) -> &PropertyMap {
        &self.last_sent
    }

    pub fn pending_mount(&self) -> Option<MountFuture> {
        self.pending_mount.clone()
    }

    pub fn unmount_generation(&self) -> u64 {
        self.unmount_generation
    }

    /// First attach: record the mount and its initial snapshot.
    ///
    /// Returns `false` when this instance was attached before or is
    /// disposed, in which case nothing is mounted. A repeated attach cancels
    /// any pending deferred disposal.
    pub fn begin_mount(&mut self, props: PropertyMap, mount: MountFuture) -> bool {
        if self.phase != Phase::Unmounted || self.is_disposed {
            self.unmount_generation += 1;
            return false;
        }

        self.phase = Phase::Mounting;
        self.pending_mount = Some(mount);
        // The mount carries the newest properties; anything recorded
        // before it is older.
        self.latest = None;
        self.last_sent = props;
        true
    }

    /// The mount resolved. On success the instance becomes `Idle`; the caller
    /// should then ask for [`next_update`](Self::next_update) to flush
    /// changes observed while mounting.
    pub fn mount_resolved(&mut self, ok: bool) {
        if self.phase != Phase::Mounting {
            return;
        }
        self.phase = if ok { Phase::Idle } else { Phase::Failed };
    }

    /// Store the newest snapshot from the host.
    pub fn record(&mut self, props: PropertyMap) {
        if !self.is_disposed {
            self.latest = Some(props);
        }
    }

    /// Decide whether to send an update now.
    ///
    /// Only an `Idle`, non-disposed instance with a recorded snapshot that
    /// differs from `last_sent` produces an update; it then moves to
    /// `Updating` until [`finish_update`](Self::finish_update).
    pub fn next_update(&mut self) -> Option<PendingUpdate> {
        if self.phase != Phase::Idle || self.is_disposed {
            return None;
        }

        let snapshot = self.latest.take()?;
        let changed = changed_properties(&self.last_sent, &snapshot);
        if changed.is_empty() {
            return None;
        }

        self.phase = Phase::Updating;
        Some(PendingUpdate { changed, snapshot })
    }

    /// The in-flight update completed. Only an acknowledged update advances
    /// `last_sent`.
    pub fn finish_update(&mut self, snapshot: PropertyMap, acknowledged: bool) {
        if self.phase != Phase::Updating {
            return;
        }
        if acknowledged {
            self.last_sent = snapshot;
        }
        self.phase = Phase::Idle;
    }

    /// Set the disposed flag. Returns `false` if it was already set.
    pub fn mark_disposed(&mut self) -> bool {
        if self.is_disposed {
            return false;
        }
        self.is_disposed = true;
        self.latest = None;
        true
    }

    /// The remote dispose call is about to be issued.
    pub fn begin_dispose(&mut self) {
        self.phase = Phase::Disposing;
    }

    /// Terminal transition once disposal is done, or was found unnecessary.
    /// A failed mount stays `Failed`.
    pub fn finish_dispose(&mut self) {
        if self.phase != Phase::Failed {
            self.phase = Phase::Disposed;
        }
    }
}

impl Default for MountState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountState")
            .field("phase", &self.phase)
            .field("mounted", &self.pending_mount.is_some())
            .field("last_sent", &self.last_sent)
            .field("has_latest", &self.latest.is_some())
            .field("is_disposed", &self.is_disposed)
            .field("unmount_generation", &self.unmount_generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;
    use futures_util::FutureExt;

    fn never_mount() -> MountFuture {
        futures_util::future::pending::<Result<Arc<dyn RemoteComponent>, InteropError>>()
            .boxed()
            .shared()
    }

    fn mounted(initial: PropertyMap) -> MountState {
        let mut state = MountState::new();
        assert!(state.begin_mount(initial, never_mount()));
        state.mount_resolved(true);
        state
    }

    #[test]
    fn mount_happens_once() {
        let mut state = MountState::new();
        assert!(state.begin_mount(props! { "a" => 1 }, never_mount()));
        assert_eq!(state.phase(), Phase::Mounting);
        assert!(state.phase().has_pending_update());

        assert!(!state.begin_mount(props! { "a" => 2 }, never_mount()));
        assert_eq!(state.phase(), Phase::Mounting);
        assert!(state.last_sent()["a"].strict_eq(&1.into()));
    }

    #[test]
    fn mount_discards_snapshot_recorded_before_attach() {
        let mut state = MountState::new();
        state.record(props! { "a" => 1 });
        assert!(state.next_update().is_none());

        state.begin_mount(props! { "a" => 2 }, never_mount());
        state.mount_resolved(true);

        assert!(state.next_update().is_none());
        assert!(state.last_sent()["a"].strict_eq(&2.into()));
    }

    #[test]
    fn no_update_while_mounting() {
        let mut state = MountState::new();
        state.begin_mount(props! { "a" => 1 }, never_mount());

        state.record(props! { "a" => 2 });
        assert!(state.next_update().is_none());

        state.mount_resolved(true);
        let update = state.next_update().expect("buffered change flushes after mount");
        assert_eq!(update.changed.len(), 1);
        assert_eq!(state.phase(), Phase::Updating);
    }

    #[test]
    fn unchanged_snapshot_sends_nothing() {
        let mut state = mounted(props! { "a" => 1, "b" => "x" });
        state.record(props! { "a" => 1, "b" => "x" });
        assert!(state.next_update().is_none());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn only_changed_keys_are_sent() {
        let mut state = mounted(props! { "a" => 1, "b" => "x" });
        state.record(props! { "a" => 2, "b" => "x" });

        let update = state.next_update().unwrap();
        assert_eq!(update.changed.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(update.snapshot.len(), 2);
    }

    #[test]
    fn one_update_in_flight_and_latest_wins() {
        let mut state = mounted(props! { "a" => 1, "b" => "x" });
        state.record(props! { "a" => 2, "b" => "x" });
        let first = state.next_update().unwrap();

        state.record(props! { "a" => 2, "b" => "y" });
        assert!(state.next_update().is_none());
        state.record(props! { "a" => 3, "b" => "y" });
        assert!(state.next_update().is_none());

        state.finish_update(first.snapshot, true);
        let second = state.next_update().unwrap();
        assert_eq!(second.changed.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(second.changed["a"].strict_eq(&3.into()));
        assert!(second.changed["b"].strict_eq(&"y".into()));
    }

    #[test]
    fn rejected_update_keeps_last_sent() {
        let mut state = mounted(props! { "a" => 1 });
        state.record(props! { "a" => 2 });
        let update = state.next_update().unwrap();

        state.finish_update(update.snapshot, false);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.last_sent()["a"].strict_eq(&1.into()));

        state.record(props! { "a" => 2 });
        assert!(state.next_update().is_some());
    }

    #[test]
    fn disposed_is_monotonic_and_blocks_updates() {
        let mut state = mounted(props! { "a" => 1 });
        assert!(state.mark_disposed());
        assert!(!state.mark_disposed());

        state.record(props! { "a" => 2 });
        assert!(state.next_update().is_none());
        assert!(!state.begin_mount(props! {}, never_mount()));
    }

    #[test]
    fn failed_mount_is_terminal() {
        let mut state = MountState::new();
        state.begin_mount(props! {}, never_mount());
        state.mount_resolved(false);
        assert_eq!(state.phase(), Phase::Failed);

        state.record(props! { "a" => 1 });
        assert!(state.next_update().is_none());
        state.finish_dispose();
        assert_eq!(state.phase(), Phase::Failed);
    }

    #[test]
    fn repeated_attach_bumps_generation() {
        let mut state = mounted(props! {});
        let before = state.unmount_generation();
        assert!(!state.begin_mount(props! {}, never_mount()));
        assert_eq!(state.unmount_generation(), before + 1);
    }
}
