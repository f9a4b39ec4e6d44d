//! Recursive file-tree copy with glob selection and token substitution.

use globset::GlobSet;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{
    context::VariableContext,
    error::{Error, Result},
    renderer::TemplateRenderer,
};

/// How a selected file is written to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Tokens are substituted in content and file name
    Substitute,
    /// Content is copied byte for byte, only the file name is substituted
    Verbatim,
}

/// Selection and transformation applied by [`copy_tree`].
pub struct CopySpec<'a> {
    /// Only files matching this set are copied, when given
    pub includes: Option<&'a GlobSet>,
    /// Files matching any of these sets are skipped
    pub excludes: &'a [&'a GlobSet],
    pub mode: ContentMode,
    /// Recreate source directories even when no file lands in them
    pub create_dirs: bool,
    pub renderer: &'a dyn TemplateRenderer,
    pub context: &'a VariableContext,
}

impl CopySpec<'_> {
    fn selects(&self, relative: &Path) -> bool {
        self.includes.is_none_or(|includes| includes.is_match(relative))
            && !self.excludes.iter().any(|excludes| excludes.is_match(relative))
    }

    fn target_path(&self, relative: &Path, target_dir: &Path) -> PathBuf {
        let rendered = self.renderer.render(&relative.to_string_lossy(), self.context);
        target_dir.join(rendered)
    }
}

/// Copies the selected files of `source_dir` into `target_dir`,
/// overwriting existing files.
///
/// # Returns
/// * Number of files written
///
/// # Errors
/// * `Error::WalkdirError` if the source tree cannot be traversed
/// * `Error::SkeletonIoError` if a file cannot be read or written
pub fn copy_tree(source_dir: &Path, target_dir: &Path, spec: &CopySpec) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };

        if entry.file_type().is_dir() {
            if spec.create_dirs && !spec.excludes.iter().any(|e| e.is_match(relative)) {
                let target = spec.target_path(relative, target_dir);
                fs::create_dir_all(&target).map_err(Error::skeleton_io(&target))?;
            }
            continue;
        }

        if !spec.selects(relative) {
            debug!("Skipping {}", relative.display());
            continue;
        }

        let target = spec.target_path(relative, target_dir);
        copy_file(entry.path(), &target, spec)?;
        copied += 1;
    }
    Ok(copied)
}

fn copy_file(source: &Path, target: &Path, spec: &CopySpec) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(Error::skeleton_io(parent))?;
    }

    if spec.mode == ContentMode::Substitute {
        let bytes = fs::read(source).map_err(Error::skeleton_io(source))?;
        match String::from_utf8(bytes) {
            Ok(content) => {
                debug!("Writing file: {}", target.display());
                let rendered = spec.renderer.render(&content, spec.context);
                return fs::write(target, rendered).map_err(Error::skeleton_io(target));
            }
            Err(_) => warn!("{} is not valid UTF-8, copying it unchanged", source.display()),
        }
    }

    debug!("Copying file: {}", target.display());
    fs::copy(source, target).map(|_| ()).map_err(Error::skeleton_io(target))
}

/// Copies a single file, creating parent directories as needed.
pub fn copy_plain(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(Error::skeleton_io(parent))?;
    }
    fs::copy(source, target).map(|_| ()).map_err(Error::skeleton_io(target))
}
