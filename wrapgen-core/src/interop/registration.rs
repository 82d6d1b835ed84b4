//! Server-side registration of components under JavaScript identifiers.
//!
//! A component type is registered as `<kebab-case-type-name>-<suffix>`,
//! which is also the identifier the adapter mounts with. Keeping both sides
//! on [`registration_identifier`] is what makes the generated wrapper find
//! its server component.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::codegen::casing::to_kebab_case;
use crate::error::RegistryError;
use crate::metadata::Framework;

/// `QuickGrid` + Vue -> `quick-grid-vue`.
pub fn registration_identifier(type_name: &str, framework: Framework) -> String {
    format!("{}-{}", to_kebab_case(type_name), framework.suffix())
}

/// Identifier to server component type table.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: DashMap<String, String>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `type_name` for `framework` and return its identifier.
    ///
    /// Registering the same type again is a no-op; a different type whose
    /// name collides on the same identifier is rejected.
    pub fn register(&self, type_name: &str, framework: Framework) -> Result<String, RegistryError> {
        let identifier = registration_identifier(type_name, framework);

        match self.entries.entry(identifier.clone()) {
            Entry::Occupied(existing) if existing.get() != type_name => {
                Err(RegistryError::AlreadyRegistered {
                    identifier,
                    existing: existing.get().clone(),
                })
            }
            Entry::Occupied(_) => Ok(identifier),
            Entry::Vacant(slot) => {
                debug!(%identifier, type_name, "registered component");
                slot.insert(type_name.to_string());
                Ok(identifier)
            }
        }
    }

    /// The server type registered under `identifier`.
    pub fn resolve(&self, identifier: &str) -> Option<String> {
        self.entries.get(identifier).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
