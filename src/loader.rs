//! Skeleton loading for profiles and features.
//! A skeleton either lives in a plain directory or is packaged inside a
//! gzip-compressed tar archive that is extracted to a scratch directory.
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Represents the source location of a skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonSource {
    /// Skeleton tree on the local filesystem
    Directory(PathBuf),
    /// Skeleton subtree `path` inside a `.tar.gz` archive
    Archive { archive: PathBuf, path: PathBuf },
}

impl std::fmt::Display for SkeletonSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkeletonSource::Directory(path) => write!(f, "directory: '{}'", path.display()),
            SkeletonSource::Archive { archive, path } => {
                write!(f, "archive: '{}!/{}'", archive.display(), path.display())
            }
        }
    }
}

impl SkeletonSource {
    /// Makes the skeleton available on the local filesystem.
    pub fn load(&self) -> Result<LoadedSkeleton> {
        debug!("Loading skeleton from {}", self);
        let loader: Box<dyn SkeletonLoader + '_> = match self {
            SkeletonSource::Directory(path) => Box::new(DirectoryLoader::new(path)),
            SkeletonSource::Archive { archive, path } => Box::new(ArchiveLoader::new(archive, path)),
        };
        loader.load()
    }
}

/// A skeleton ready to be copied.
///
/// Holds the scratch directory of an extracted archive; it is removed when
/// the value is dropped.
#[derive(Debug)]
pub struct LoadedSkeleton {
    root: PathBuf,
    _scratch: Option<TempDir>,
}

impl LoadedSkeleton {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }
}

/// Trait for loading skeletons from different sources.
pub trait SkeletonLoader {
    /// Loads the skeleton and returns its local root.
    fn load(&self) -> Result<LoadedSkeleton>;
}

/// Loader for skeletons stored as plain directories.
pub struct DirectoryLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> DirectoryLoader<P> {
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> SkeletonLoader for DirectoryLoader<P> {
    fn load(&self) -> Result<LoadedSkeleton> {
        Ok(LoadedSkeleton { root: self.path.as_ref().to_path_buf(), _scratch: None })
    }
}

/// Loader for skeletons packaged in `.tar.gz` archives.
pub struct ArchiveLoader<A: AsRef<Path>, P: AsRef<Path>> {
    archive: A,
    path: P,
}

impl<A: AsRef<Path>, P: AsRef<Path>> ArchiveLoader<A, P> {
    pub fn new(archive: A, path: P) -> Self {
        Self { archive, path }
    }
}

impl<A: AsRef<Path>, P: AsRef<Path>> SkeletonLoader for ArchiveLoader<A, P> {
    /// Extracts the archive into a fresh scratch directory.
    ///
    /// # Errors
    /// * `Error::SkeletonIoError` if the archive cannot be opened or unpacked
    fn load(&self) -> Result<LoadedSkeleton> {
        let archive = self.archive.as_ref();
        let scratch = TempDir::new().map_err(Error::skeleton_io(archive))?;

        debug!("Extracting '{}' to '{}'.", archive.display(), scratch.path().display());
        let file = File::open(archive).map_err(Error::skeleton_io(archive))?;
        tar::Archive::new(GzDecoder::new(file))
            .unpack(scratch.path())
            .map_err(Error::skeleton_io(archive))?;

        Ok(LoadedSkeleton { root: scratch.path().join(self.path.as_ref()), _scratch: Some(scratch) })
    }
}
