//! Vue single-file-component shell.

use std::path::{Path, PathBuf};

use super::casing::to_kebab_case;
use super::shell::{property_list, ShellWriter};
use crate::metadata::{ComponentDescriptor, Framework};

/// Writes `<out>/<Name>.vue`.
#[derive(Debug, Clone)]
pub struct VueWriter {
    helper_module: String,
}

impl VueWriter {
    pub fn new(helper_module: impl Into<String>) -> Self {
        Self {
            helper_module: helper_module.into(),
        }
    }
}

impl Default for VueWriter {
    fn default() -> Self {
        Self::new(Framework::Vue.helper_module())
    }
}

impl ShellWriter for VueWriter {
    fn framework(&self) -> Framework {
        Framework::Vue
    }

    fn file_path(&self, output_dir: &Path, component: &ComponentDescriptor) -> PathBuf {
        output_dir.join(format!("{}.vue", component.name))
    }

    fn render(&self, component: &ComponentDescriptor) -> String {
        let name = &component.name;
        let props = property_list(&component.parameters);
        let identifier = to_kebab_case(name);
        let helper = &self.helper_module;

        format!(
            "<script setup lang='ts'>
import {{ getCurrentInstance }} from 'vue';
import {{ useBlazor }} from './{helper}';

interface Props {{{props}
}}

const props = defineProps<Props>();
const instance = getCurrentInstance();

const {name} = useBlazor(instance, '{identifier}', props)

</script>

<template>
    <{name} />
</template>
"
        )
    }
}
