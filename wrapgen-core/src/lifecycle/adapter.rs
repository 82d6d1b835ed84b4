//! Component Lifecycle Adapter
//!
//! Bridges one host-framework wrapper instance to one remote root component.
//!
//! # How It Works
//!
//! 1. `attach` mounts the remote instance once, without blocking the host.
//!    The mount is kept as a shared future so every later step can wait on
//!    the same handle.
//!
//! 2. `notify` records the host's newest property snapshot. When nothing is
//!    in flight the snapshot is diffed against the last sent one and only the
//!    changed keys are forwarded. While the mount or an update is in flight
//!    the snapshot just waits in a single slot; the running update loop picks
//!    it up when the remote side acknowledges.
//!
//! 3. `unmount` waits out a grace period, then disposes the remote instance
//!    exactly once, after the mount and any in-flight update complete.
//!
//! Every operation that starts background work returns a [`Scheduled`]
//! handle. Remote rejections surface there and are never retried; ignoring
//! the handle is allowed.
//!
//! # Cancellation
//!
//! There is no cancel primitive. Re-attaching within the grace period makes
//! the pending disposal a no-op. This is a timing race: a re-attach that
//! arrives after the grace period elapsed finds the instance disposed.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::FutureExt;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::state::{MountFuture, MountState, PendingUpdate, Phase};
use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::interop::{NodeRef, PropertyMap, RemoteHost};
use crate::metadata::Framework;

/// A background adapter operation.
///
/// Resolves to the operation's outcome. Dropping it detaches the operation;
/// it keeps running.
#[must_use = "dropping a Scheduled detaches it; await it to observe remote failures"]
pub struct Scheduled {
    task: JoinHandle<Result<(), AdapterError>>,
}

impl Scheduled {
    fn spawn<F>(runtime: &Handle, future: F) -> Self
    where
        F: Future<Output = Result<(), AdapterError>> + Send + 'static,
    {
        Self {
            task: runtime.spawn(future),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Future for Scheduled {
    type Output = Result<(), AdapterError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.task).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(join)) => Poll::Ready(Err(AdapterError::Join(join))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl std::fmt::Debug for Scheduled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduled")
            .field("finished", &self.is_finished())
            .finish()
    }
}

struct Inner {
    /// `<identifier>-<suffix>`, the key the remote side registered under.
    remote_identifier: String,
    host: Arc<dyn RemoteHost>,
    config: AdapterConfig,
    runtime: Handle,
    state: Mutex<MountState>,
    /// Held across every call on the mounted instance so dispose never
    /// overlaps an in-flight set-parameters.
    gate: tokio::sync::Mutex<()>,
}

/// Lifecycle adapter for one wrapper instance.
///
/// Cheap to clone; clones drive the same instance.
#[derive(Clone)]
pub struct ComponentAdapter {
    inner: Arc<Inner>,
}

impl ComponentAdapter {
    /// Create an adapter for the component registered as
    /// `<identifier>-<framework suffix>`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime. Background work runs on
    /// the runtime that was current here, so the host may call the other
    /// methods from any thread.
    pub fn new(
        identifier: &str,
        framework: Framework,
        host: Arc<dyn RemoteHost>,
        config: AdapterConfig,
    ) -> Self {
        Self::with_runtime(identifier, framework, host, config, Handle::current())
    }

    pub fn with_runtime(
        identifier: &str,
        framework: Framework,
        host: Arc<dyn RemoteHost>,
        config: AdapterConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                remote_identifier: format!("{}-{}", identifier, framework.suffix()),
                host,
                config,
                runtime,
                state: Mutex::new(MountState::new()),
                gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn remote_identifier(&self) -> &str {
        &self.inner.remote_identifier
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.inner.config
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.lock().phase()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.lock().is_disposed()
    }

    /// The snapshot the remote instance last acknowledged.
    pub fn last_sent(&self) -> PropertyMap {
        self.inner.state.lock().last_sent().clone()
    }

    /// The placeholder was placed under `parent`.
    ///
    /// The first call mounts the remote instance with `props`; it returns the
    /// mount operation, which also flushes changes observed while mounting.
    /// Later calls never mount again; they only cancel a pending deferred
    /// disposal and return `None`.
    pub fn attach(&self, parent: NodeRef, props: PropertyMap) -> Option<Scheduled> {
        let mount = self.mount_future(parent, props.clone());

        let started = self.inner.state.lock().begin_mount(props, mount.clone());
        if !started {
            debug!(identifier = %self.inner.remote_identifier, "already attached, not mounting again");
            return None;
        }

        debug!(identifier = %self.inner.remote_identifier, parent = parent.raw(), "mounting remote component");
        let inner = Arc::clone(&self.inner);
        Some(Scheduled::spawn(&self.inner.runtime, run_mount(inner, mount)))
    }

    /// The host observed new property values.
    ///
    /// Returns the update operation when this call started one, `None` when
    /// nothing changed, the instance is disposed, or an in-flight operation
    /// will pick the snapshot up.
    pub fn notify(&self, props: PropertyMap) -> Option<Scheduled> {
        let update = {
            let mut state = self.inner.state.lock();
            if state.is_disposed() {
                debug!(identifier = %self.inner.remote_identifier, "ignoring properties after disposal");
                return None;
            }
            state.record(props);
            state.next_update()
        }?;

        let inner = Arc::clone(&self.inner);
        Some(Scheduled::spawn(&self.inner.runtime, run_updates(inner, update)))
    }

    /// The host element was removed. Disposal runs after the grace period
    /// unless the adapter is attached again before then.
    pub fn unmount(&self) -> Scheduled {
        let generation = self.inner.state.lock().unmount_generation();
        debug!(
            identifier = %self.inner.remote_identifier,
            grace_ms = u64::try_from(self.inner.config.grace_period.as_millis()).unwrap_or(u64::MAX),
            "scheduling deferred disposal"
        );
        let inner = Arc::clone(&self.inner);
        Scheduled::spawn(&self.inner.runtime, run_dispose(inner, generation))
    }

    /// The lazily started add-root-component call, shared between the mount
    /// task, the update loop and disposal.
    fn mount_future(&self, parent: NodeRef, props: PropertyMap) -> MountFuture {
        let host = Arc::clone(&self.inner.host);
        let identifier = self.inner.remote_identifier.clone();
        async move { host.add_root_component(parent, &identifier, props).await }
            .boxed()
            .shared()
    }
}

impl std::fmt::Debug for ComponentAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentAdapter")
            .field("remote_identifier", &self.inner.remote_identifier)
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}

async fn run_mount(inner: Arc<Inner>, mount: MountFuture) -> Result<(), AdapterError> {
    let result = mount.await;

    let update = {
        let mut state = inner.state.lock();
        state.mount_resolved(result.is_ok());
        if result.is_ok() {
            state.next_update()
        } else {
            None
        }
    };

    if let Err(source) = result {
        warn!(identifier = %inner.remote_identifier, error = %source, "mount rejected");
        return Err(AdapterError::Mount {
            identifier: inner.remote_identifier.clone(),
            source,
        });
    }
    debug!(identifier = %inner.remote_identifier, "mounted");

    match update {
        Some(update) => run_updates(inner, update).await,
        None => Ok(()),
    }
}

/// Send `update`, then keep sending whatever changed while it was in flight
/// until the instance settles. Only one of these runs per instance, because
/// an update only exists while the state is `Updating`.
async fn run_updates(inner: Arc<Inner>, mut update: PendingUpdate) -> Result<(), AdapterError> {
    loop {
        let mount = inner.state.lock().pending_mount();
        let component = match mount {
            Some(mount) => mount.await,
            None => {
                inner.state.lock().finish_update(update.snapshot, false);
                return Ok(());
            }
        };
        let Ok(component) = component else {
            // The mount task reports the rejection.
            inner.state.lock().finish_update(update.snapshot, false);
            return Ok(());
        };

        let gate = inner.gate.lock().await;
        let disposed = inner.state.lock().is_disposed();
        if disposed {
            debug!(identifier = %inner.remote_identifier, "dropping update for disposed component");
            inner.state.lock().finish_update(update.snapshot, false);
            return Ok(());
        }

        debug!(
            identifier = %inner.remote_identifier,
            changed = update.changed.len(),
            "setting parameters"
        );
        let result = component.set_parameters(update.changed).await;
        drop(gate);

        let next = {
            let mut state = inner.state.lock();
            state.finish_update(update.snapshot, result.is_ok());
            if result.is_ok() {
                state.next_update()
            } else {
                None
            }
        };

        if let Err(source) = result {
            warn!(identifier = %inner.remote_identifier, error = %source, "parameter update rejected");
            return Err(AdapterError::Update {
                identifier: inner.remote_identifier.clone(),
                source,
            });
        }

        match next {
            Some(next) => update = next,
            None => return Ok(()),
        }
    }
}

async fn run_dispose(inner: Arc<Inner>, generation: u64) -> Result<(), AdapterError> {
    tokio::time::sleep(inner.config.grace_period).await;

    let mount = {
        let mut state = inner.state.lock();
        if state.unmount_generation() != generation {
            debug!(identifier = %inner.remote_identifier, "re-attached during grace period, keeping instance");
            return Ok(());
        }
        if !state.mark_disposed() {
            return Ok(());
        }
        match state.pending_mount() {
            Some(mount) => mount,
            None => {
                state.finish_dispose();
                return Ok(());
            }
        }
    };

    let component = match mount.await {
        Ok(component) => component,
        Err(_) => {
            let mut state = inner.state.lock();
            state.mount_resolved(false);
            state.finish_dispose();
            debug!(identifier = %inner.remote_identifier, "mount was rejected, nothing to dispose");
            return Ok(());
        }
    };

    let _gate = inner.gate.lock().await;
    inner.state.lock().begin_dispose();
    debug!(identifier = %inner.remote_identifier, "disposing remote component");
    let result = component.dispose().await;
    inner.state.lock().finish_dispose();

    result.map_err(|source| {
        warn!(identifier = %inner.remote_identifier, error = %source, "dispose rejected");
        AdapterError::Dispose {
            identifier: inner.remote_identifier.clone(),
            source,
        }
    })
}
