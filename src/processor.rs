//! Orchestration of a single project generation.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::{
    constants::{APPLICATION_CONFIG, BUILD_FILE},
    context::VariableContext,
    dependencies::{aggregate, RenderedBlocks},
    error::{Error, Result},
    identifier::Identifiers,
    materializer::SkeletonMaterializer,
    merger::documents,
    patcher::BuildDescriptorPatcher,
    profile::{Feature, Profile},
    renderer::{TemplateRenderer, TokenRenderer},
    repository::ProfileRepository,
};

/// Inputs of one generation, independent of the command-line layer.
#[derive(Debug, Clone, Default)]
pub struct CreateAppOptions {
    /// `app` or `group.app`
    pub app_name: Option<String>,
    /// Generate into `base_dir` itself instead of a new subdirectory
    pub inplace: bool,
    pub profile: String,
    /// Requested features; `None` selects the profile's defaults
    pub features: Option<Vec<String>>,
    /// Directory the project is created in (or, in place, the project itself)
    pub base_dir: PathBuf,
    /// Generate into an existing directory
    pub force: bool,
    /// Version of the running tool
    pub version: Option<String>,
}

/// The generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProject {
    pub target_dir: PathBuf,
    pub app_name: String,
    pub package: String,
    pub config_file: PathBuf,
    pub build_file: PathBuf,
}

/// Creates a project from a profile chain and a set of features.
pub struct CreateApp<'a> {
    repository: &'a dyn ProfileRepository,
    renderer: Box<dyn TemplateRenderer>,
}

impl<'a> CreateApp<'a> {
    pub fn new(repository: &'a dyn ProfileRepository) -> Self {
        Self { repository, renderer: Box::new(TokenRenderer::new()) }
    }

    /// Runs the whole pipeline.
    ///
    /// # Flow
    /// 1. Resolves the identifiers (nothing is written if this fails)
    /// 2. Resolves the profile and its dependencies
    /// 3. Builds the template variables
    /// 4. Overlays every profile skeleton, then every feature skeleton
    /// 5. Renders the dependency and plugin blocks
    /// 6. Patches the tokens throughout the generated tree
    /// 7. Checks that the generated configuration still parses
    ///
    /// # Errors
    /// A failure after step 4 started leaves the partially generated tree in place.
    pub fn run(&self, options: &CreateAppOptions) -> Result<TargetProject> {
        let current_dir_name = dir_name(&options.base_dir);
        let ids = Identifiers::derive(options.app_name.as_deref(), options.inplace, &current_dir_name)?;

        let profile = self
            .repository
            .profile(&options.profile)?
            .ok_or_else(|| Error::ProfileNotFound { name: options.profile.clone() })?;
        debug!("Using profile '{}': {}", profile.name, profile.description);
        let chain = self.repository.profile_and_dependencies(&profile)?;
        let features = select_features(&profile, &chain, options.features.as_deref());

        let target_dir = if options.inplace {
            options.base_dir.clone()
        } else {
            options.base_dir.join(&ids.app_name)
        };
        ensure_target_dir(&target_dir, options.inplace || options.force)?;

        let context = VariableContext::new(&ids, &profile.name, options.version.as_deref());
        let materializer = SkeletonMaterializer::new(&target_dir, &*self.renderer, &context);
        for overlay in &chain {
            materializer.overlay_profile(overlay, &profile)?;
        }
        for feature in &features {
            materializer.overlay_feature(feature, &profile)?;
        }

        let blocks: RenderedBlocks = aggregate(&chain, &features);
        let patched = BuildDescriptorPatcher::new(&*self.renderer, &context, &blocks)
            .patch_tree(&target_dir)?;
        debug!("Patched {} files", patched);

        let config_file = target_dir.join(APPLICATION_CONFIG);
        check_configuration(&config_file);

        Ok(TargetProject {
            config_file,
            build_file: target_dir.join(BUILD_FILE),
            target_dir,
            app_name: ids.app_name,
            package: ids.package,
        })
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Logs how many documents the generated configuration holds.
///
/// An unparsable file is reported but does not fail the generation.
fn check_configuration(config_file: &Path) {
    let Ok(text) = fs::read_to_string(config_file) else {
        return;
    };
    match documents(config_file, &text) {
        Ok(docs) => debug!("{} holds {} documents", config_file.display(), docs.len()),
        Err(e) => warn!("Generated configuration is not valid YAML: {}", e),
    }
}

/// Picks the features to apply from those provided by the profile chain.
///
/// The most specific profile wins when several provide a feature of the same name.
/// Unknown names are skipped with a warning.
pub fn select_features<'p>(
    profile: &'p Profile,
    chain: &'p [Profile],
    requested: Option<&[String]>,
) -> Vec<&'p Feature> {
    let names = requested.unwrap_or(&profile.default_features);
    let mut selected: Vec<&Feature> = Vec::new();
    for name in names {
        if selected.iter().any(|f| &f.name == name) {
            continue;
        }
        match chain.iter().rev().find_map(|p| p.feature(name)) {
            Some(feature) => {
                debug!("Selected feature '{}': {}", feature.name, feature.description);
                selected.push(feature);
            }
            None => warn!("Feature '{}' does not exist in profile '{}'", name, profile.name),
        }
    }
    selected
}

/// Ensures the target directory is safe to generate into.
///
/// # Errors
/// * `Error::TargetExistsError` if the directory exists and `force` is false
pub fn ensure_target_dir<P: AsRef<Path>>(target_dir: P, force: bool) -> Result<()> {
    let target_dir = target_dir.as_ref();
    if target_dir.exists() && !force {
        return Err(Error::TargetExistsError { target_dir: target_dir.display().to_string() });
    }
    fs::create_dir_all(target_dir).map_err(Error::skeleton_io(target_dir))
}
