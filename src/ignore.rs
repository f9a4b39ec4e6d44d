//! Exclude and binary file patterns for skeleton copying.
//! Patterns are glob expressions matched case-insensitively against paths
//! relative to the skeleton root.

use crate::constants::{BINARY_EXTENSIONS, BUILD_FILE, FILLER_FILE};
use crate::error::Result;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::Path;

/// Compiles `patterns` into a single case-insensitive [`GlobSet`].
///
/// # Errors
/// * `Error::GlobError` if a pattern is not a valid glob
pub fn build_glob_set<I, S>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern.as_ref()).case_insensitive(true).build()?);
    }
    Ok(builder.build()?)
}

/// Matches every file with one of the binary extensions, at any depth.
///
/// This is the one place that decides what is binary, for both the copy
/// passes and the final patch pass.
pub fn binary_glob_set() -> Result<GlobSet> {
    build_glob_set(BINARY_EXTENSIONS.iter().map(|ext| format!("**/*.{ext}")))
}

/// File selection shared by the text and binary passes of one overlay.
#[derive(Debug, Clone)]
pub struct SkeletonExcludes {
    /// Configured excludes plus the filler marker and the build descriptor
    pub excludes: GlobSet,
    /// Files copied verbatim
    pub binaries: GlobSet,
}

impl SkeletonExcludes {
    /// Builds the exclude sets for a profile or feature.
    ///
    /// # Arguments
    /// * `configured` - Skeleton excludes declared by the profile
    pub fn new(configured: &[String]) -> Result<Self> {
        let fixed = [format!("**/{FILLER_FILE}"), BUILD_FILE.to_string()];
        let excludes = build_glob_set(configured.iter().cloned().chain(fixed))?;
        let binaries = binary_glob_set()?;

        debug!("Skeleton excludes: {:?}", configured);
        Ok(Self { excludes, binaries })
    }

    pub fn is_excluded<P: AsRef<Path>>(&self, path: P) -> bool {
        self.excludes.is_match(path)
    }
}
