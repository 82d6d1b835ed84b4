//! Component Metadata
//!
//! The generator consumes already-extracted component metadata: for each
//! server-defined component, its PascalCase name, the frameworks it should be
//! wrapped for, and its ordered parameter list.
//!
//! Metadata is read once from a JSON manifest and is immutable afterwards.
//! The loader validates what the writers rely on: component names are usable
//! identifiers and parameter names are unique within a component.

mod descriptor;
mod manifest;

pub use descriptor::{ComponentDescriptor, Framework, ParameterDescriptor};
pub use manifest::Manifest;
