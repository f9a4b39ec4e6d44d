//! Final token replacement over the generated project.

use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::constants::{BUILD_DEPENDENCIES_TOKEN, DEPENDENCIES_TOKEN, PLUGINS_TOKEN};
use crate::context::VariableContext;
use crate::dependencies::RenderedBlocks;
use crate::error::{Error, Result};
use crate::ignore::binary_glob_set;
use crate::renderer::TemplateRenderer;

/// Replaces the block tokens and every `@key@` variable token in all text
/// files under the target directory.
pub struct BuildDescriptorPatcher<'a> {
    renderer: &'a dyn TemplateRenderer,
    context: &'a VariableContext,
    blocks: &'a RenderedBlocks,
}

impl<'a> BuildDescriptorPatcher<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        context: &'a VariableContext,
        blocks: &'a RenderedBlocks,
    ) -> Self {
        Self { renderer, context, blocks }
    }

    /// Applies the replacements to a piece of text.
    pub fn patch(&self, text: &str) -> String {
        let text = text
            .replace(PLUGINS_TOKEN, &self.blocks.build_plugins)
            .replace(DEPENDENCIES_TOKEN, &self.blocks.dependencies)
            .replace(BUILD_DEPENDENCIES_TOKEN, &self.blocks.build_dependencies);
        self.renderer.render(&text, self.context)
    }

    /// Patches every text file under `target_dir`.
    ///
    /// Binary and non-UTF-8 files are left alone; files are rewritten only
    /// when their content changes.
    ///
    /// # Returns
    /// * Number of files rewritten
    pub fn patch_tree(&self, target_dir: &Path) -> Result<usize> {
        let binaries = binary_glob_set()?;
        let mut patched = 0;
        for entry in WalkDir::new(target_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(target_dir) else {
                continue;
            };
            if !entry.file_type().is_file() || binaries.is_match(relative) {
                continue;
            }
            let Ok(text) = fs::read_to_string(path) else {
                continue;
            };
            let replaced = self.patch(&text);
            if replaced != text {
                debug!("Patching {}", path.display());
                fs::write(path, replaced).map_err(Error::skeleton_io(path))?;
                patched += 1;
            }
        }
        Ok(patched)
    }
}
