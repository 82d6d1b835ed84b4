//! Wrapper Generation
//!
//! Turns component metadata into framework-specific wrapper files.
//!
//! # Pieces
//!
//! - `type_map`: maps server source type names to TypeScript type labels.
//! - `casing`: camelCase property names and kebab-case interop identifiers.
//! - `shell`: the [`ShellWriter`] seam with the React and Vue implementations.
//! - `pipeline`: the generation pass over a manifest.
//!
//! Rendering is a pure formatting step; only [`ShellWriter::write`] and the
//! pipeline touch the filesystem.

pub mod casing;
mod pipeline;
mod react;
mod shell;
mod type_map;
mod vue;

pub use pipeline::{GenerationReport, Generator};
pub use react::ReactWriter;
pub use shell::ShellWriter;
pub use type_map::{map_type, Primitive, TargetType, EVENT_CALLBACK_TYPE_NAME};
pub use vue::VueWriter;
