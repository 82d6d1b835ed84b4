//! Descriptor types for components and their parameters.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codegen::casing::is_pascal_identifier;
use crate::codegen::{map_type, TargetType};
use crate::error::GenerateError;

/// A JavaScript framework the generator can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
}

impl Framework {
    /// Suffix appended to the kebab-case identifier when registering and
    /// mounting a component for this framework.
    pub fn suffix(self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
        }
    }

    /// Module name the generated files import the lifecycle glue from.
    pub fn helper_module(self) -> &'static str {
        match self {
            Framework::React => "blazor-react",
            Framework::Vue => "blazor-vue",
        }
    }

    pub fn helper_extension(self) -> &'static str {
        match self {
            Framework::React => "js",
            Framework::Vue => "ts",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One configurable input of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// PascalCase parameter name as declared on the server.
    pub name: String,

    /// Fully qualified source type name, e.g. `System.Int32` or
    /// `System.Int32?`.
    #[serde(rename = "typeName")]
    pub source_type_name: String,

    /// Marks the parameter optional even when the type name has no `?`.
    #[serde(default, rename = "optional")]
    pub is_optional: bool,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, source_type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_type_name: source_type_name.into(),
            is_optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// The mapped target type, honoring `is_optional`.
    pub fn target_type(&self) -> TargetType {
        let mapped = map_type(&self.source_type_name);
        if self.is_optional {
            mapped.into_optional()
        } else {
            mapped
        }
    }
}

/// A server-defined component to wrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,

    /// Frameworks this component is generated for. Empty means all.
    #[serde(default)]
    pub targets: Vec<Framework>,
}

impl ComponentDescriptor {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            name: name.into(),
            parameters,
            targets: Vec::new(),
        }
    }

    pub fn targets(&self, framework: Framework) -> bool {
        self.targets.is_empty() || self.targets.contains(&framework)
    }

    /// The name must be a usable identifier and parameter names unique.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !is_pascal_identifier(&self.name) {
            return Err(GenerateError::InvalidComponentName(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(parameter.name.as_str()) {
                return Err(GenerateError::DuplicateParameter {
                    component: self.name.clone(),
                    parameter: parameter.name.clone(),
                });
            }
        }
        Ok(())
    }
}
