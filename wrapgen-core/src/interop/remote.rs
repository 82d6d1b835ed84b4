//! The remote component-hosting runtime, as seen by the adapter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;

use super::value::PropertyMap;
use crate::error::InteropError;

/// Reference to a host-side node (a DOM element or equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(u64);

impl NodeRef {
    /// Allocate a fresh node reference.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for NodeRef {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds root components on the remote side.
pub trait RemoteHost: Send + Sync + 'static {
    /// Mount a root component of the registered `identifier` under `parent`
    /// with its initial properties.
    fn add_root_component(
        &self,
        parent: NodeRef,
        identifier: &str,
        props: PropertyMap,
    ) -> BoxFuture<'static, Result<Arc<dyn RemoteComponent>, InteropError>>;
}

/// A mounted remote root component.
pub trait RemoteComponent: Send + Sync + 'static {
    /// Push changed parameters. Only the changed keys are passed.
    fn set_parameters(&self, changed: PropertyMap) -> BoxFuture<'static, Result<(), InteropError>>;

    /// Tear the instance down.
    fn dispose(&self) -> BoxFuture<'static, Result<(), InteropError>>;
}
