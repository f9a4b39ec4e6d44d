//! Error handling for the stencil application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for stencil operations.
///
/// Every variant is deterministic for a given input, so none of them is retried:
/// they surface to `main` as a message and a non-zero exit code.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested profile is not known to the profile repository
    #[error("Profile not found: '{name}'.")]
    ProfileNotFound { name: String },

    /// No application name was given and `--inplace` was not requested
    #[error("Specify an application name or use --inplace to create an application in the current directory.")]
    MissingTarget,

    /// The derived or supplied package name is not a legal dotted identifier
    #[error("Cannot derive a valid package name from '{app_name}'. Specify an application name that is a valid package identifier or pass the package explicitly as 'group.app'.")]
    InvalidPackageName { app_name: String },

    /// Copying or extracting a skeleton failed
    #[error("Skeleton IO error at '{}': {source}.", .path.display())]
    SkeletonIoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Walking a skeleton or target tree failed
    #[error("Directory traversal error: {0}.")]
    WalkdirError(#[from] walkdir::Error),

    /// An exclude, binary or executable pattern could not be compiled
    #[error("Invalid glob pattern: {0}.")]
    GlobError(#[from] globset::Error),

    /// A `profile.yml` or `feature.yml` file could not be parsed
    #[error("Invalid profile descriptor '{}': {source}.", .path.display())]
    ProfileDescriptorError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Dependency coordinates are not of the form `group:artifact[:version]`
    #[error("Invalid dependency coordinates: '{coords}'.")]
    InvalidCoordinates { coords: String },

    /// The target directory exists and `--force` was not given
    #[error("Directory '{target_dir}' already exists. Use --force to generate into it anyway.")]
    TargetExistsError { target_dir: String },

    /// No profile repository was configured before the command ran
    #[error("No profile repository configured. Pass --profile-repository or set STENCIL_PROFILE_REPOSITORY.")]
    ConfigurationUnset,
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an io error raised while handling a skeleton file.
    pub fn skeleton_io<P: Into<PathBuf>>(path: P) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::SkeletonIoError { path, source }
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
