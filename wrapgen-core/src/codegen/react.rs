//! React function-component shell.

use std::path::{Path, PathBuf};

use super::casing::to_kebab_case;
use super::shell::{parameter_list, property_list, ShellWriter};
use crate::metadata::{ComponentDescriptor, Framework};

/// Writes `<out>/generated/<Name>.ts`.
#[derive(Debug, Clone)]
pub struct ReactWriter {
    helper_module: String,
}

impl ReactWriter {
    pub fn new(helper_module: impl Into<String>) -> Self {
        Self {
            helper_module: helper_module.into(),
        }
    }
}

impl Default for ReactWriter {
    fn default() -> Self {
        Self::new(Framework::React.helper_module())
    }
}

impl ShellWriter for ReactWriter {
    fn framework(&self) -> Framework {
        Framework::React
    }

    fn file_path(&self, output_dir: &Path, component: &ComponentDescriptor) -> PathBuf {
        output_dir
            .join("generated")
            .join(format!("{}.ts", component.name))
    }

    fn render(&self, component: &ComponentDescriptor) -> String {
        let name = &component.name;
        let props = property_list(&component.parameters);
        let destructured = parameter_list(&component.parameters, 1);
        let forwarded = parameter_list(&component.parameters, 2);
        let identifier = to_kebab_case(name);
        let helper = &self.helper_module;

        format!(
            "import React from 'react';
import {{ useBlazor }} from './{helper}';

interface {name}Props {{{props}
}}

export const {name}: React.VFC<{name}Props> = ({{{destructured}
}}) => {{
  const fragment = useBlazor('{identifier}', {{{forwarded}
  }});

  return fragment;
}}
"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ParameterDescriptor;

    #[test]
    fn renders_counter() {
        let component = ComponentDescriptor::new(
            "QuickCounter",
            vec![
                ParameterDescriptor::new("IncrementAmount", "System.Int32"),
                ParameterDescriptor::new(
                    "OnCount",
                    "Microsoft.AspNetCore.Components.EventCallback<System.Int32>",
                ),
            ],
        );

        let expected = "import React from 'react';
import { useBlazor } from './blazor-react';

interface QuickCounterProps {
  incrementAmount: number;
  onCount: (_: number) => void;
}

export const QuickCounter: React.VFC<QuickCounterProps> = ({
  incrementAmount,
  onCount,
}) => {
  const fragment = useBlazor('quick-counter', {
    incrementAmount,
    onCount,
  });

  return fragment;
}
";
        assert_eq!(ReactWriter::default().render(&component), expected);
    }

    #[test]
    fn file_goes_under_generated() {
        let component = ComponentDescriptor::new("Counter", vec![]);
        let path = ReactWriter::default().file_path(Path::new("web/src"), &component);
        assert_eq!(path, Path::new("web/src/generated/Counter.ts"));
    }
}
