//! Configuration for the generator and the lifecycle adapter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::metadata::Framework;

/// Default delay between a host unmount and the remote dispose call.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(1000);

/// Settings for a [`ComponentAdapter`](crate::lifecycle::ComponentAdapter).
///
/// The grace period trades dispose latency for robustness against a host
/// that unmounts and immediately re-attaches the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    #[serde(rename = "grace_period_ms", with = "millis", default = "default_grace")]
    pub grace_period: Duration,
}

fn default_grace() -> Duration {
    DEFAULT_GRACE_PERIOD
}

impl AdapterConfig {
    pub fn with_grace_period(grace_period: Duration) -> Self {
        Self { grace_period }
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Settings for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory the component files are written to.
    pub output_dir: PathBuf,

    /// Framework to generate wrappers for.
    pub framework: Framework,

    /// Module name of the runtime helper the generated files import.
    /// Defaults to the framework's conventional helper module.
    #[serde(default)]
    pub helper_module: Option<String>,

    /// Where to copy the runtime helper from when it is missing in
    /// `output_dir`. No copy is attempted when unset.
    #[serde(default)]
    pub helper_source: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>, framework: Framework) -> Self {
        Self {
            output_dir: output_dir.into(),
            framework,
            helper_module: None,
            helper_source: None,
        }
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, GenerateError> {
        let text = std::fs::read_to_string(path).map_err(|e| GenerateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| GenerateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The helper module name, falling back to the framework default.
    pub fn helper_module(&self) -> &str {
        self.helper_module
            .as_deref()
            .unwrap_or_else(|| self.framework.helper_module())
    }

    /// File name of the helper on disk, e.g. `blazor-vue.ts`.
    pub fn helper_file_name(&self) -> String {
        format!("{}.{}", self.helper_module(), self.framework.helper_extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_config_defaults_to_one_second() {
        assert_eq!(AdapterConfig::default().grace_period, Duration::from_millis(1000));
    }

    #[test]
    fn adapter_config_reads_millis() {
        let config: AdapterConfig = serde_json::from_str(r#"{"grace_period_ms": 250}"#).unwrap();
        assert_eq!(config.grace_period, Duration::from_millis(250));

        let config: AdapterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AdapterConfig::default());
    }

    #[test]
    fn oversized_grace_period_saturates() {
        let config = AdapterConfig::with_grace_period(Duration::MAX);
        let value = serde_json::to_value(config).unwrap();
        assert_eq!(value["grace_period_ms"], serde_json::json!(u64::MAX));
    }

    #[test]
    fn generator_config_helper_falls_back_to_framework() {
        let config = GeneratorConfig::new("out", Framework::Vue);
        assert_eq!(config.helper_module(), "blazor-vue");
        assert_eq!(config.helper_file_name(), "blazor-vue.ts");

        let config: GeneratorConfig = serde_json::from_str(
            r#"{"output_dir": "web/src", "framework": "react", "helper_module": "bridge"}"#,
        )
        .unwrap();
        assert_eq!(config.framework, Framework::React);
        assert_eq!(config.helper_module(), "bridge");
        assert_eq!(config.helper_file_name(), "bridge.js");
    }
}
