//! Profiles, features and the dependencies they declare.

use std::path::Path;
use std::str::FromStr;

use crate::config::{DependencyConfig, FeatureConfig, ProfileConfig, SkeletonConfig};
use crate::constants::{BUILD_SCOPE, DEFAULT_EXECUTABLES, SKELETON_DIR};
use crate::error::{Error, Result};
use crate::loader::SkeletonSource;

/// An artifact required by the generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    /// May be empty or carry the `BOM` marker
    pub version: String,
    pub scope: String,
}

impl Dependency {
    /// Parses `group:artifact[:version]` coordinates.
    pub fn parse(coords: &str, scope: &str) -> Result<Self> {
        let mut dependency: Dependency = coords.parse()?;
        dependency.scope = scope.to_string();
        Ok(dependency)
    }

    pub fn is_build(&self) -> bool {
        self.scope == BUILD_SCOPE
    }
}

impl FromStr for Dependency {
    type Err = Error;

    fn from_str(coords: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinates { coords: coords.to_string() };
        let parts: Vec<&str> = coords.trim().split(':').collect();
        let (group_id, artifact_id, version) = match parts.as_slice() {
            [g, a] => (*g, *a, ""),
            [g, a, v] => (*g, *a, *v),
            _ => return Err(invalid()),
        };
        if group_id.is_empty() || artifact_id.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            scope: String::new(),
        })
    }
}

fn parse_dependencies(configs: &[DependencyConfig]) -> Result<Vec<Dependency>> {
    configs.iter().map(|d| Dependency::parse(&d.coords, &d.scope)).collect()
}

fn skeleton_source(base: &Path, config: &SkeletonConfig) -> SkeletonSource {
    let path = config.path.clone().unwrap_or_else(|| SKELETON_DIR.into());
    match &config.archive {
        Some(archive) => SkeletonSource::Archive { archive: base.join(archive), path },
        None => SkeletonSource::Directory(base.join(path)),
    }
}

/// An optional add-on contributing a skeleton fragment, dependencies and plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub description: String,
    pub skeleton: SkeletonSource,
    pub dependencies: Vec<Dependency>,
    pub build_plugins: Vec<String>,
}

impl Feature {
    /// Builds a feature from its descriptor located in `base`.
    pub fn from_config(name: &str, base: &Path, config: FeatureConfig) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            description: config.description,
            skeleton: skeleton_source(base, &config.skeleton),
            dependencies: parse_dependencies(&config.dependencies)?,
            build_plugins: config.build.plugins,
        })
    }
}

/// A named, composable project skeleton with its build declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub description: String,
    /// Names of the profiles this one depends on
    pub extends: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub build_plugins: Vec<String>,
    pub skeleton: SkeletonSource,
    pub skeleton_excludes: Vec<String>,
    pub executable_patterns: Vec<String>,
    /// Profiles whose build descriptor is concatenated to the existing one
    pub build_merge: Vec<String>,
    pub default_features: Vec<String>,
    pub features: Vec<Feature>,
}

impl Profile {
    /// Builds a profile from its descriptor located in `base`.
    pub fn from_config(
        name: &str,
        base: &Path,
        config: ProfileConfig,
        features: Vec<Feature>,
    ) -> Result<Self> {
        let executable_patterns = config
            .skeleton
            .executable
            .clone()
            .unwrap_or_else(|| DEFAULT_EXECUTABLES.iter().map(|p| p.to_string()).collect());
        Ok(Self {
            name: name.to_string(),
            description: config.description,
            extends: config.extends,
            dependencies: parse_dependencies(&config.dependencies)?,
            build_plugins: config.build.plugins,
            skeleton: skeleton_source(base, &config.skeleton),
            skeleton_excludes: config.skeleton.excludes,
            executable_patterns,
            build_merge: config.build.merge,
            default_features: config.features.defaults,
            features,
        })
    }

    /// Whether the build descriptor of `profile` is appended rather than dropped.
    pub fn merges_build_of(&self, profile: &str) -> bool {
        self.build_merge.iter().any(|name| name == profile)
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }
}
