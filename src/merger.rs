//! Multi-document merging of the application configuration file.
//!
//! Every overlay that contributes a configuration fragment adds a new YAML
//! document after the existing ones; earlier content is never rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::constants::DOCUMENT_SEPARATOR;
use crate::error::{Error, Result};

/// Text of the configuration file captured before an overlay pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot(Option<String>);

impl ConfigSnapshot {
    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Appends configuration fragments to a multi-document YAML file.
#[derive(Debug, Clone)]
pub struct ConfigMerger {
    path: PathBuf,
}

impl ConfigMerger {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Captures the current configuration text, if the file exists.
    pub fn snapshot(&self) -> Result<ConfigSnapshot> {
        if !self.path.is_file() {
            return Ok(ConfigSnapshot(None));
        }
        let text = fs::read_to_string(&self.path).map_err(Error::skeleton_io(&self.path))?;
        Ok(ConfigSnapshot(Some(text)))
    }

    /// Restores the previous documents after a profile overlay replaced the file.
    ///
    /// Nothing happens when the file was absent before or is unchanged.
    ///
    /// # Returns
    /// * Whether the file was rewritten
    pub fn merge_profile(&self, previous: &ConfigSnapshot) -> Result<bool> {
        let Some(previous) = previous.text() else {
            return Ok(false);
        };
        let Some(current) = self.snapshot()?.0 else {
            return Ok(false);
        };
        if current == previous {
            return Ok(false);
        }
        self.write_appended(previous, &current)?;
        Ok(true)
    }

    /// Appends a feature's configuration fragment.
    ///
    /// Feature overlays never copy the configuration file itself, so the
    /// fragment is read from the feature skeleton and appended whenever both
    /// the target file and the fragment exist. A fragment with no existing
    /// file to append to becomes the file, so a feature's configuration is
    /// kept even when no profile in the chain ships one.
    ///
    /// # Arguments
    /// * `previous` - Snapshot taken before the feature overlay
    /// * `fragment` - Path of the feature's own configuration fragment
    pub fn merge_feature(&self, previous: &ConfigSnapshot, fragment: &Path) -> Result<bool> {
        if !fragment.is_file() {
            return Ok(false);
        }
        let addition = fs::read_to_string(fragment).map_err(Error::skeleton_io(fragment))?;
        match previous.text() {
            Some(previous) => self.write_appended(previous, &addition)?,
            None => {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent).map_err(Error::skeleton_io(parent))?;
                }
                fs::write(&self.path, addition).map_err(Error::skeleton_io(&self.path))?;
            }
        }
        Ok(true)
    }

    fn write_appended(&self, previous: &str, current: &str) -> Result<()> {
        debug!("Appending configuration document to {}", self.path.display());
        fs::write(&self.path, append_document(previous, current))
            .map_err(Error::skeleton_io(&self.path))
    }
}

/// Joins `previous` and `next` into one multi-document text.
pub fn append_document(previous: &str, next: &str) -> String {
    let mut merged = String::with_capacity(previous.len() + next.len() + 10);
    if !previous.starts_with(DOCUMENT_SEPARATOR) {
        merged.push_str(DOCUMENT_SEPARATOR);
        merged.push('\n');
    }
    merged.push_str(previous);
    merged.push('\n');
    merged.push_str(DOCUMENT_SEPARATOR);
    merged.push('\n');
    merged.push_str(next);
    merged
}

/// Parses every YAML document of a multi-document text.
///
/// # Errors
/// * `Error::ProfileDescriptorError` if a document is not valid YAML
pub fn documents(path: &Path, text: &str) -> Result<Vec<serde_yaml::Value>> {
    serde_yaml::Deserializer::from_str(text)
        .map(serde_yaml::Value::deserialize)
        .collect::<std::result::Result<_, _>>()
        .map_err(|source| Error::ProfileDescriptorError { path: path.to_path_buf(), source })
}
