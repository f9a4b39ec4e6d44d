use std::path::PathBuf;

use stencil::dependencies::{aggregate, coordinates, render_blocks};
use stencil::loader::SkeletonSource;
use stencil::profile::{Dependency, Feature, Profile};

fn dep(coords: &str, scope: &str) -> Dependency {
    Dependency::parse(coords, scope).unwrap()
}

fn profile(name: &str, dependencies: Vec<Dependency>, plugins: &[&str]) -> Profile {
    Profile {
        name: name.to_string(),
        description: String::new(),
        extends: Vec::new(),
        dependencies,
        build_plugins: plugins.iter().map(|p| p.to_string()).collect(),
        skeleton: SkeletonSource::Directory(PathBuf::from("skeleton")),
        skeleton_excludes: Vec::new(),
        executable_patterns: Vec::new(),
        build_merge: Vec::new(),
        default_features: Vec::new(),
        features: Vec::new(),
    }
}

#[test]
fn test_dedup_preserves_first_seen_order() {
    let a = dep("g:a:1.0", "compile");
    let a_again = dep("g:a:1.0", "compile");
    let b = dep("g:b:2.0", "build");

    let blocks = render_blocks(&[&a, &a_again, &b], &[]);

    assert_eq!(blocks.dependencies, "    compile \"g:a:1.0\"");
    assert_eq!(blocks.build_dependencies, "        classpath \"g:b:2.0\"");
}

#[test]
fn test_partition_keeps_order_within_scope() {
    let deps = [
        dep("g:z:1", "runtime"),
        dep("g:plugin:1", "build"),
        dep("g:a:1", "compile"),
        dep("g:z:1", "runtime"),
        dep("g:other-plugin:2", "build"),
    ];
    let refs: Vec<&Dependency> = deps.iter().collect();
    let blocks = render_blocks(&refs, &[]);

    assert_eq!(
        blocks.dependencies,
        "    runtime \"g:z:1\"\n    compile \"g:a:1\""
    );
    assert_eq!(
        blocks.build_dependencies,
        "        classpath \"g:plugin:1\"\n        classpath \"g:other-plugin:2\""
    );
}

#[test]
fn test_same_coordinates_in_different_scopes_are_kept() {
    let compile = dep("g:a:1", "compile");
    let test = dep("g:a:1", "testCompile");
    let blocks = render_blocks(&[&compile, &test], &[]);
    assert_eq!(blocks.dependencies.lines().count(), 2);
}

#[test]
fn test_bom_marker_is_stripped() {
    assert_eq!(coordinates(&dep("g:a:1.0.BOM", "compile")), "g:a:1.0");
    assert_eq!(coordinates(&dep("g:a:BOM", "compile")), "g:a");
    assert_eq!(coordinates(&dep("g:a", "compile")), "g:a");
    assert_eq!(coordinates(&dep("g:a:3.1.4", "compile")), "g:a:3.1.4");
}

#[test]
fn test_plugins_profile_first_then_features() {
    let base = profile("base", vec![dep("g:core:1", "compile")], &["eclipse", "idea"]);
    let web = profile("web", vec![dep("g:core:1", "compile")], &["war", "idea"]);
    let feature = Feature {
        name: "json".to_string(),
        description: String::new(),
        skeleton: SkeletonSource::Directory(PathBuf::from("skeleton")),
        dependencies: vec![dep("g:json:2", "compile"), dep("g:json-plugin:2", "build")],
        build_plugins: vec!["json".to_string(), "war".to_string()],
    };

    let blocks = aggregate(&[base, web], &[&feature]);

    assert_eq!(
        blocks.build_plugins,
        "apply plugin:\"eclipse\"\napply plugin:\"idea\"\napply plugin:\"war\"\napply plugin:\"json\""
    );
    assert_eq!(
        blocks.dependencies,
        "    compile \"g:core:1\"\n    compile \"g:json:2\""
    );
    assert_eq!(blocks.build_dependencies, "        classpath \"g:json-plugin:2\"");
}

#[test]
fn test_empty_inputs_render_empty_blocks() {
    let blocks = render_blocks(&[], &[]);
    assert!(blocks.dependencies.is_empty());
    assert!(blocks.build_dependencies.is_empty());
    assert!(blocks.build_plugins.is_empty());
}
