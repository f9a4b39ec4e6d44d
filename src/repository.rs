//! Profile lookup and dependency resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{load_config, FeatureConfig, ProfileConfig};
use crate::constants::{FEATURES_DIR, FEATURE_FILE, PROFILE_FILE};
use crate::error::{Error, Result};
use crate::profile::{Feature, Profile};

/// Source of profiles by name.
pub trait ProfileRepository {
    /// Returns the profile called `name`, or `None` if the repository has none.
    fn profile(&self, name: &str) -> Result<Option<Profile>>;

    /// Returns `profile` and every profile it transitively extends,
    /// dependencies first and each profile once.
    ///
    /// # Errors
    /// * `Error::ProfileNotFound` if a parent profile cannot be resolved
    fn profile_and_dependencies(&self, profile: &Profile) -> Result<Vec<Profile>> {
        let mut visited = HashSet::new();
        let mut sorted = Vec::new();
        visit(self, profile.clone(), &mut visited, &mut sorted)?;
        Ok(sorted)
    }
}

fn visit<R: ProfileRepository + ?Sized>(
    repository: &R,
    profile: Profile,
    visited: &mut HashSet<String>,
    sorted: &mut Vec<Profile>,
) -> Result<()> {
    if !visited.insert(profile.name.clone()) {
        return Ok(());
    }
    for parent in &profile.extends {
        let resolved = repository
            .profile(parent)?
            .ok_or_else(|| Error::ProfileNotFound { name: parent.clone() })?;
        visit(repository, resolved, visited, sorted)?;
    }
    sorted.push(profile);
    Ok(())
}

/// Repository of profiles stored as directories under a common root.
///
/// ```text
/// <root>/<profile>/profile.yml
/// <root>/<profile>/skeleton/
/// <root>/<profile>/features/<feature>/feature.yml
/// <root>/<profile>/features/<feature>/skeleton/
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemProfileRepository {
    root: PathBuf,
}

impl FileSystemProfileRepository {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_features(&self, profile_dir: &Path) -> Result<Vec<Feature>> {
        let features_dir = profile_dir.join(FEATURES_DIR);
        if !features_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut feature_dirs = Vec::new();
        for entry in std::fs::read_dir(&features_dir)? {
            let path = entry?.path();
            if path.join(FEATURE_FILE).is_file() {
                feature_dirs.push(path);
            }
        }
        feature_dirs.sort();

        feature_dirs
            .into_iter()
            .map(|dir| {
                let name = dir.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();
                let config: FeatureConfig = load_config(dir.join(FEATURE_FILE))?;
                Feature::from_config(&name, &dir, config)
            })
            .collect()
    }
}

impl ProfileRepository for FileSystemProfileRepository {
    fn profile(&self, name: &str) -> Result<Option<Profile>> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Ok(None);
        }
        let profile_dir = self.root.join(name);
        let descriptor = profile_dir.join(PROFILE_FILE);
        if !descriptor.is_file() {
            debug!("No profile descriptor at {}", descriptor.display());
            return Ok(None);
        }

        let config: ProfileConfig = load_config(&descriptor)?;
        let features = self.load_features(&profile_dir)?;
        Profile::from_config(name, &profile_dir, config, features).map(Some)
    }
}
