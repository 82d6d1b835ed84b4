//! Placeholder rendering.
//!
//! The wrapper renders an empty `template` node carrying the adapter's node
//! reference. Once the host has placed it, the node's parent becomes the
//! mount point of the remote root component.

use super::adapter::{ComponentAdapter, Scheduled};
use crate::interop::NodeRef;
use crate::reactive::PropsSource;

/// Tag of the placeholder node.
pub const PLACEHOLDER_TAG: &str = "template";

/// What the wrapper contributes to the host's output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub tag: &'static str,
    pub node_ref: NodeRef,
}

/// Stable render function for one wrapper instance.
///
/// Rendering never mounts; only [`attach_to`](Self::attach_to) does, and
/// only the first time.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    node_ref: NodeRef,
    adapter: ComponentAdapter,
    props: PropsSource,
}

impl RenderHandle {
    pub(crate) fn new(adapter: ComponentAdapter, props: PropsSource) -> Self {
        Self {
            node_ref: NodeRef::new(),
            adapter,
            props,
        }
    }

    pub fn node_ref(&self) -> NodeRef {
        self.node_ref
    }

    /// The same placeholder on every call.
    pub fn render(&self) -> Placeholder {
        Placeholder {
            tag: PLACEHOLDER_TAG,
            node_ref: self.node_ref,
        }
    }

    /// The host placed the placeholder under `parent`. Mounts with the
    /// current properties on the first call.
    pub fn attach_to(&self, parent: NodeRef) -> Option<Scheduled> {
        self.adapter.attach(parent, self.props.get())
    }
}
