//! stencil generates new projects from a chain of inheritable profiles
//! plus optional features. Skeleton files get the project identifiers
//! substituted, configuration fragments are appended as documents and
//! dependency declarations are rendered into the build descriptor.

/// Command-line interface module for the stencil application
pub mod cli;

/// Profile and feature descriptors (profile.yml, feature.yml)
pub mod config;

/// Common constants: file names, tokens and binary extensions
pub mod constants;

/// Template variables derived from the project identifiers
pub mod context;

/// Recursive file-tree copy with glob selection
pub mod copy;

/// Dependency and plugin aggregation
pub mod dependencies;

/// Error types and handling for the stencil application
pub mod error;

/// Application name, package name and naming variants
pub mod identifier;

/// Exclude and binary file patterns
pub mod ignore;

/// Directory and archive skeleton loaders
pub mod loader;

/// Overlay of skeletons onto the target directory
pub mod materializer;

/// Multi-document configuration merging
pub mod merger;

/// Final token replacement in the generated tree
pub mod patcher;

/// Core generation orchestration
/// Combines all components to generate the final output
pub mod processor;

/// Profiles, features and dependencies
pub mod profile;

/// Token substitution
pub mod renderer;

/// Profile lookup and dependency resolution
pub mod repository;
