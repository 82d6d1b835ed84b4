//! Host integration entry point.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::adapter::{ComponentAdapter, Scheduled};
use super::render::RenderHandle;
use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::interop::RemoteHost;
use crate::metadata::Framework;
use crate::reactive::{PropsSource, Subscription};

/// A wrapper instance wired to its props source.
///
/// Every `set` on the source is forwarded to the adapter as a property
/// change notification. Updates started that way have no caller to return a
/// [`Scheduled`] to, so their rejections are collected here instead; see
/// [`take_update_errors`](Self::take_update_errors).
///
/// Dropping the binding stops forwarding; it does not dispose the remote
/// instance, call [`unmount`](Self::unmount) for that.
#[derive(Debug)]
pub struct ComponentBinding {
    adapter: ComponentAdapter,
    render: RenderHandle,
    update_errors: Mutex<mpsc::UnboundedReceiver<AdapterError>>,
    _subscription: Subscription,
}

impl ComponentBinding {
    pub fn adapter(&self) -> &ComponentAdapter {
        &self.adapter
    }

    pub fn render_handle(&self) -> &RenderHandle {
        &self.render
    }

    /// Rejections of updates driven by the props source, oldest first.
    /// Each one is returned once.
    pub fn take_update_errors(&self) -> Vec<AdapterError> {
        let mut errors = self.update_errors.lock();
        std::iter::from_fn(|| errors.try_recv().ok()).collect()
    }

    /// Schedule deferred disposal of the remote instance.
    pub fn unmount(&self) -> Scheduled {
        self.adapter.unmount()
    }
}

/// Create the adapter for one wrapper instance of the component registered
/// as `<identifier>-<framework suffix>` and subscribe it to `props`.
///
/// Must be called inside a Tokio runtime; see [`ComponentAdapter::new`].
pub fn use_component(
    identifier: &str,
    framework: Framework,
    props: &PropsSource,
    host: Arc<dyn RemoteHost>,
    config: AdapterConfig,
) -> ComponentBinding {
    let runtime = Handle::current();
    let adapter = ComponentAdapter::with_runtime(identifier, framework, host, config, runtime.clone());
    let (errors_tx, errors_rx) = mpsc::unbounded_channel();

    let notified = adapter.clone();
    let subscription = props.subscribe(move |snapshot| {
        let Some(update) = notified.notify(snapshot.clone()) else {
            return;
        };
        let errors = errors_tx.clone();
        runtime.spawn(async move {
            if let Err(err) = update.await {
                // Receiver gone means the binding was dropped.
                let _ = errors.send(err);
            }
        });
    });

    ComponentBinding {
        render: RenderHandle::new(adapter.clone(), props.clone()),
        adapter,
        update_errors: Mutex::new(errors_rx),
        _subscription: subscription,
    }
}
