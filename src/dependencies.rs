//! Aggregation of dependency and plugin declarations into build descriptor blocks.

use indexmap::IndexSet;

use crate::constants::BOM_MARKER;
use crate::profile::{Dependency, Feature, Profile};

/// Text blocks substituted into the build descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlocks {
    /// One `<scope> "<coords>"` line per non-build dependency
    pub dependencies: String,
    /// One `classpath "<coords>"` line per build dependency
    pub build_dependencies: String,
    /// One `apply plugin` line per plugin
    pub build_plugins: String,
}

/// Renders `group:artifact:version`, omitting the version when only a
/// `BOM` marker is left.
pub fn coordinates(dependency: &Dependency) -> String {
    let version = dependency.version.replace(BOM_MARKER, "");
    let version = version.trim_end_matches(['.', '-']);
    if version.is_empty() {
        format!("{}:{}", dependency.group_id, dependency.artifact_id)
    } else {
        format!("{}:{}:{}", dependency.group_id, dependency.artifact_id, version)
    }
}

fn dependency_line(dependency: &Dependency) -> String {
    if dependency.is_build() {
        format!("        classpath \"{}\"", coordinates(dependency))
    } else {
        format!("    {} \"{}\"", dependency.scope, coordinates(dependency))
    }
}

fn plugin_line(plugin: &str) -> String {
    format!("apply plugin:\"{plugin}\"")
}

fn join_unique<I: IntoIterator<Item = String>>(lines: I) -> String {
    lines.into_iter().collect::<IndexSet<_>>().into_iter().collect::<Vec<_>>().join("\n")
}

/// Renders the dependency and plugin blocks.
///
/// Declarations are taken in order: `dependencies` and `plugins` first (the
/// profile chain), then those of every feature. Duplicate lines keep their
/// first position.
pub fn render_blocks(dependencies: &[&Dependency], plugins: &[&str]) -> RenderedBlocks {
    let (build, regular): (Vec<&Dependency>, Vec<&Dependency>) =
        dependencies.iter().copied().partition(|d| d.is_build());

    RenderedBlocks {
        dependencies: join_unique(regular.into_iter().map(dependency_line)),
        build_dependencies: join_unique(build.into_iter().map(dependency_line)),
        build_plugins: join_unique(plugins.iter().map(|p| plugin_line(p))),
    }
}

/// Collects the declarations of the profile chain followed by the features.
pub fn aggregate(profiles: &[Profile], features: &[&Feature]) -> RenderedBlocks {
    let dependencies: Vec<&Dependency> = profiles
        .iter()
        .flat_map(|p| &p.dependencies)
        .chain(features.iter().flat_map(|f| &f.dependencies))
        .collect();
    let plugins: Vec<&str> = profiles
        .iter()
        .flat_map(|p| &p.build_plugins)
        .chain(features.iter().flat_map(|f| &f.build_plugins))
        .map(String::as_str)
        .collect();

    render_blocks(&dependencies, &plugins)
}
