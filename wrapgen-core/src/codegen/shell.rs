//! The writer seam shared by the framework-specific component shells.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::GenerateError;
use crate::metadata::{ComponentDescriptor, Framework, ParameterDescriptor};

use super::casing::pascal_to_camel_case;

/// Renders and writes the wrapper component for one framework.
///
/// `render` is a pure function of its input, so writing the same component
/// twice produces byte-identical files.
pub trait ShellWriter {
    fn framework(&self) -> Framework;

    /// Destination of `component` below `output_dir`.
    fn file_path(&self, output_dir: &Path, component: &ComponentDescriptor) -> PathBuf;

    /// The full contents of the generated file.
    fn render(&self, component: &ComponentDescriptor) -> String;

    /// Render `component` and write it, creating missing parent directories.
    fn write(
        &self,
        output_dir: &Path,
        component: &ComponentDescriptor,
    ) -> Result<PathBuf, GenerateError> {
        let path = self.file_path(output_dir, component);
        let contents = self.render(component);

        let io_error = |source| GenerateError::Write {
            component: component.name.clone(),
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(&path, contents).map_err(io_error)?;

        Ok(path)
    }
}

/// `\n  name: type;` for every parameter.
pub(crate) fn property_list(parameters: &[ParameterDescriptor]) -> String {
    let mut out = String::new();
    for parameter in parameters {
        let _ = write!(
            out,
            "\n  {}: {};",
            pascal_to_camel_case(&parameter.name),
            parameter.target_type()
        );
    }
    out
}

/// `\n<indent>name,` for every parameter, two spaces per indent level.
pub(crate) fn parameter_list(parameters: &[ParameterDescriptor], indent_level: usize) -> String {
    let indent = "  ".repeat(indent_level);
    let mut out = String::new();
    for parameter in parameters {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(&pascal_to_camel_case(&parameter.name));
        out.push(',');
    }
    out
}
