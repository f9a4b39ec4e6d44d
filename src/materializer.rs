//! Overlay of profile and feature skeletons onto the target directory.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::constants::{APPLICATION_CONFIG, BUILD_FILE, IGNORE_FILE};
use crate::context::VariableContext;
use crate::copy::{copy_plain, copy_tree, ContentMode, CopySpec};
use crate::error::{Error, Result};
use crate::ignore::{build_glob_set, SkeletonExcludes};
use crate::merger::ConfigMerger;
use crate::profile::{Feature, Profile};
use crate::renderer::TemplateRenderer;

/// Applies skeletons to one target directory, one overlay pass at a time.
pub struct SkeletonMaterializer<'a> {
    target_dir: &'a Path,
    renderer: &'a dyn TemplateRenderer,
    context: &'a VariableContext,
    merger: ConfigMerger,
}

impl<'a> SkeletonMaterializer<'a> {
    pub fn new(
        target_dir: &'a Path,
        renderer: &'a dyn TemplateRenderer,
        context: &'a VariableContext,
    ) -> Self {
        let merger = ConfigMerger::new(target_dir.join(APPLICATION_CONFIG));
        Self { target_dir, renderer, context, merger }
    }

    /// Overlays the skeleton of `overlay`, one profile of the chain of `requested`.
    ///
    /// Skeleton excludes and the build merge list are read from `requested`,
    /// so a profile can leave out files contributed by the profiles it extends.
    ///
    /// # Errors
    /// * `Error::SkeletonIoError` if the skeleton cannot be loaded or copied
    pub fn overlay_profile(&self, overlay: &Profile, requested: &Profile) -> Result<()> {
        let skeleton = overlay.skeleton.load()?;
        if !skeleton.exists() {
            debug!("Profile '{}' has no skeleton at {}", overlay.name, overlay.skeleton);
            return Ok(());
        }
        let root = skeleton.root();
        debug!("Applying skeleton of profile '{}'", overlay.name);

        let previous = self.merger.snapshot()?;
        self.copy_ignore_file(root)?;
        let excludes = SkeletonExcludes::new(&requested.skeleton_excludes)?;
        self.copy_skeleton(root, &excludes)?;
        self.apply_build_file(root, overlay, requested)?;
        self.mark_executables(&overlay.executable_patterns)?;

        if self.merger.merge_profile(&previous)? {
            debug!("Appended configuration of profile '{}'", overlay.name);
        }
        Ok(())
    }

    /// Overlays the skeleton of a selected feature and appends its
    /// configuration fragment.
    pub fn overlay_feature(&self, feature: &Feature, requested: &Profile) -> Result<()> {
        let skeleton = feature.skeleton.load()?;
        if !skeleton.exists() {
            debug!("Feature '{}' has no skeleton at {}", feature.name, feature.skeleton);
            return Ok(());
        }
        let root = skeleton.root();
        debug!("Applying skeleton of feature '{}'", feature.name);

        let previous = self.merger.snapshot()?;
        let mut configured = requested.skeleton_excludes.clone();
        configured.push(APPLICATION_CONFIG.to_string());
        let excludes = SkeletonExcludes::new(&configured)?;
        self.copy_skeleton(root, &excludes)?;
        self.mark_executables(&requested.executable_patterns)?;

        if self.merger.merge_feature(&previous, &root.join(APPLICATION_CONFIG))? {
            debug!("Appended configuration of feature '{}'", feature.name);
        }
        Ok(())
    }

    fn copy_ignore_file(&self, root: &Path) -> Result<()> {
        let source = root.join(IGNORE_FILE);
        if source.is_file() {
            copy_plain(&source, &self.target_dir.join(IGNORE_FILE))?;
        }
        Ok(())
    }

    /// Text pass followed by the binary pass; every file goes through exactly one.
    fn copy_skeleton(&self, root: &Path, excludes: &SkeletonExcludes) -> Result<()> {
        let text = CopySpec {
            includes: None,
            excludes: &[&excludes.excludes, &excludes.binaries],
            mode: ContentMode::Substitute,
            create_dirs: true,
            renderer: self.renderer,
            context: self.context,
        };
        let copied = copy_tree(root, self.target_dir, &text)?;

        let binary = CopySpec {
            includes: Some(&excludes.binaries),
            excludes: &[&excludes.excludes],
            mode: ContentMode::Verbatim,
            create_dirs: false,
            renderer: self.renderer,
            context: self.context,
        };
        let copied_binary = copy_tree(root, self.target_dir, &binary)?;

        debug!("Copied {} text and {} binary files", copied, copied_binary);
        Ok(())
    }

    fn apply_build_file(&self, root: &Path, overlay: &Profile, requested: &Profile) -> Result<()> {
        let source = root.join(BUILD_FILE);
        if !source.is_file() {
            return Ok(());
        }
        let target = self.target_dir.join(BUILD_FILE);
        if !target.exists() {
            return copy_plain(&source, &target);
        }
        if requested.merges_build_of(&overlay.name) {
            debug!("Concatenating {} of profile '{}'", BUILD_FILE, overlay.name);
            concatenate(&target, &source)
        } else {
            debug!("Keeping existing {}, dropping the one of '{}'", BUILD_FILE, overlay.name);
            Ok(())
        }
    }

    fn mark_executables(&self, patterns: &[String]) -> Result<()> {
        if patterns.is_empty() {
            return Ok(());
        }
        let executables = build_glob_set(patterns)?;
        for entry in WalkDir::new(self.target_dir).min_depth(1) {
            let entry = entry?;
            let Ok(relative) = entry.path().strip_prefix(self.target_dir) else {
                continue;
            };
            if entry.file_type().is_file() && executables.is_match(relative) {
                make_executable(entry.path())?;
            }
        }
        Ok(())
    }
}

/// Rewrites `existing` as its own content followed by `addition`'s.
fn concatenate(existing: &Path, addition: &Path) -> Result<()> {
    let aside = existing.with_file_name(format!("{BUILD_FILE}.concat"));
    fs::rename(existing, &aside).map_err(Error::skeleton_io(existing))?;

    let mut content = fs::read_to_string(&aside).map_err(Error::skeleton_io(&aside))?;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&fs::read_to_string(addition).map_err(Error::skeleton_io(addition))?);
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(existing, content).map_err(Error::skeleton_io(existing))?;

    if let Err(e) = fs::remove_file(&aside) {
        warn!("Could not remove {}: {}", aside.display(), e);
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path).map_err(Error::skeleton_io(path))?.permissions();
    permissions.set_mode(permissions.mode() | 0o100);
    fs::set_permissions(path, permissions).map_err(Error::skeleton_io(path))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
