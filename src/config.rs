//! Configuration handling for profiles and features.
//! `profile.yml` and `feature.yml` are parsed into typed structures that expose
//! only what the generator reads.

use crate::error::{Error, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of a `profile.yml` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub description: String,
    /// Profiles this one builds upon
    pub extends: Vec<String>,
    pub features: FeaturesConfig,
    pub build: BuildConfig,
    pub dependencies: Vec<DependencyConfig>,
    pub skeleton: SkeletonConfig,
}

/// Contents of a `feature.yml` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub description: String,
    pub build: BuildConfig,
    pub dependencies: Vec<DependencyConfig>,
    pub skeleton: SkeletonConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Features applied when none are requested explicitly
    pub defaults: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub plugins: Vec<String>,
    /// Profiles whose build descriptor is appended instead of dropped
    pub merge: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DependencyConfig {
    pub scope: String,
    /// `group:artifact[:version]`
    pub coords: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    pub excludes: Vec<String>,
    pub executable: Option<Vec<String>>,
    /// `.tar.gz` archive holding the skeleton, relative to the descriptor
    pub archive: Option<PathBuf>,
    /// Skeleton root inside the archive or the descriptor directory
    pub path: Option<PathBuf>,
}

/// Loads and parses a YAML descriptor. An empty file yields the defaults.
///
/// # Errors
/// * `Error::IoError` if the file cannot be read
/// * `Error::ProfileDescriptorError` if the content is not a valid descriptor
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("Loading descriptor from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(&content)
        .map_err(|source| Error::ProfileDescriptorError { path: path.to_path_buf(), source })
}
