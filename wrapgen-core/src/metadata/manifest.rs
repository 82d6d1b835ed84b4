//! JSON manifest loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::descriptor::ComponentDescriptor;
use crate::error::GenerateError;

/// The full set of components a generation pass works on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub components: Vec<ComponentDescriptor>,
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// Only an unreadable or malformed file is an error here. Individual
    /// components are checked by [`ComponentDescriptor::validate`] during the
    /// generation pass, so one bad component does not block the others.
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let text = std::fs::read_to_string(path).map_err(|source| GenerateError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| GenerateError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Strict check: the first invalid component fails the whole manifest.
    pub fn validate(&self) -> Result<(), GenerateError> {
        self.components
            .iter()
            .try_for_each(ComponentDescriptor::validate)
    }
}
