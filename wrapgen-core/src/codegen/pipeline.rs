//! The generation pass.
//!
//! One pass targets one framework: it makes sure the runtime helper the
//! generated files import is present, then writes a shell for every
//! component that targets the framework. A component that fails to write is
//! logged and reported, and the pass moves on to the next one.

use std::path::PathBuf;

use tracing::{debug, error, info};

use super::react::ReactWriter;
use super::shell::ShellWriter;
use super::vue::VueWriter;
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::metadata::{Framework, Manifest};

/// Outcome of a generation pass.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, in manifest order.
    pub written: Vec<PathBuf>,

    /// Components that could not be written.
    pub failed: Vec<(String, GenerateError)>,

    /// Components skipped because they do not target this framework.
    pub skipped: Vec<String>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives a [`ShellWriter`] over a manifest.
pub struct Generator {
    config: GeneratorConfig,
    writer: Box<dyn ShellWriter + Send + Sync>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let helper = config.helper_module().to_string();
        let writer: Box<dyn ShellWriter + Send + Sync> = match config.framework {
            Framework::React => Box::new(ReactWriter::new(helper)),
            Framework::Vue => Box::new(VueWriter::new(helper)),
        };
        Self { config, writer }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the pass. Only a missing helper that cannot be copied aborts it;
    /// per-component failures, invalid metadata included, end up in the
    /// report.
    pub fn run(&self, manifest: &Manifest) -> Result<GenerationReport, GenerateError> {
        self.ensure_helper()?;

        let framework = self.writer.framework();
        let mut report = GenerationReport::default();

        for component in &manifest.components {
            if !component.targets(framework) {
                debug!(component = %component.name, %framework, "component does not target framework");
                report.skipped.push(component.name.clone());
                continue;
            }

            let written = component
                .validate()
                .and_then(|()| self.writer.write(&self.config.output_dir, component));
            match written {
                Ok(path) => {
                    debug!(component = %component.name, path = %path.display(), "wrote component");
                    report.written.push(path);
                }
                Err(e) => {
                    error!(component = %component.name, error = %e, "could not write component");
                    report.failed.push((component.name.clone(), e));
                }
            }
        }

        info!(
            %framework,
            written = report.written.len(),
            failed = report.failed.len(),
            "component generation complete"
        );
        Ok(report)
    }

    /// Copy the runtime helper into the output directory unless it is
    /// already there.
    fn ensure_helper(&self) -> Result<(), GenerateError> {
        let file = self.config.helper_file_name();
        let destination = self.config.output_dir.join(&file);

        if destination.exists() {
            return Ok(());
        }

        let Some(source) = &self.config.helper_source else {
            debug!(helper = %file, "no helper source configured, leaving helper to the host");
            return Ok(());
        };

        std::fs::create_dir_all(&self.config.output_dir)
            .and_then(|_| std::fs::copy(source, &destination))
            .map_err(|source| GenerateError::HelperCopy {
                file: file.clone(),
                source,
            })?;

        info!(helper = %file, "copied runtime helper");
        Ok(())
    }
}
