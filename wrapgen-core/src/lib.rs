//! Wrapgen Core
//!
//! This crate generates JavaScript-framework wrapper components for remotely
//! hosted UI components and provides the lifecycle runtime those wrappers
//! drive. It implements:
//!
//! - Source type to TypeScript type mapping
//! - React and Vue component shell writers and the generation pass
//! - The identifier registration convention shared with the remote host
//! - The component lifecycle adapter (mount, diffed updates, deferred dispose)
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `metadata`: component and parameter descriptors, manifest loading
//! - `codegen`: type mapping, casing, shell writers, generation pass
//! - `interop`: property values, remote host traits, registration
//! - `reactive`: the host's observable property snapshot
//! - `lifecycle`: the adapter state machine and its host binding
//!
//! # Example
//!
//! ```rust,ignore
//! use wrapgen_core::lifecycle::use_component;
//! use wrapgen_core::reactive::PropsSource;
//! use wrapgen_core::{props, AdapterConfig, Framework, NodeRef};
//!
//! let props = PropsSource::new(props! { "incrementAmount" => 1 });
//! let binding = use_component("counter", Framework::React, &props, host, AdapterConfig::default());
//!
//! // Host placed the placeholder: mounts "counter-react" once.
//! binding.render_handle().attach_to(NodeRef::new());
//!
//! // Only `incrementAmount` is forwarded.
//! props.set(props! { "incrementAmount" => 5 });
//!
//! // Disposed after the grace period.
//! binding.unmount().await?;
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod interop;
pub mod lifecycle;
pub mod metadata;
pub mod reactive;

pub use config::{AdapterConfig, GeneratorConfig};
pub use error::{AdapterError, GenerateError, InteropError, RegistryError, RemoteOperation};
pub use interop::{NodeRef, PropValue, PropertyMap};
pub use metadata::{ComponentDescriptor, Framework, Manifest, ParameterDescriptor};
