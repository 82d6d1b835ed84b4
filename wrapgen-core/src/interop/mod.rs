//! Interop Boundary
//!
//! Types shared between the generated wrappers' runtime and the remote
//! component-hosting runtime: property values and their change semantics,
//! the remote host traits, and the identifier registration convention.

mod registration;
mod remote;
mod value;

pub use registration::{registration_identifier, ComponentRegistry};
pub use remote::{NodeRef, RemoteComponent, RemoteHost};
pub use value::{changed_properties, CallbackId, PropValue, PropertyMap};
