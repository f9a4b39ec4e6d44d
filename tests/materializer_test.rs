use std::fs;
use std::path::{Path, PathBuf};

use stencil::context::VariableContext;
use stencil::identifier::Identifiers;
use stencil::loader::SkeletonSource;
use stencil::materializer::SkeletonMaterializer;
use stencil::merger::documents;
use stencil::profile::{Feature, Profile};
use stencil::renderer::TokenRenderer;
use tempfile::TempDir;

const CONFIG: &str = "grails-app/conf/application.yml";

fn write(root: &Path, relative: &str, content: impl AsRef<[u8]>) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn profile(name: &str, skeleton: &Path) -> Profile {
    Profile {
        name: name.to_string(),
        description: String::new(),
        extends: Vec::new(),
        dependencies: Vec::new(),
        build_plugins: Vec::new(),
        skeleton: SkeletonSource::Directory(skeleton.to_path_buf()),
        skeleton_excludes: Vec::new(),
        executable_patterns: vec!["gradlew".to_string()],
        build_merge: Vec::new(),
        default_features: Vec::new(),
        features: Vec::new(),
    }
}

fn context() -> VariableContext {
    let ids = Identifiers::derive(Some("org.acme.shop"), false, "unused").unwrap();
    VariableContext::new(&ids, "web", Some("1.0.0"))
}

#[test]
fn test_text_and_binary_passes() {
    let skeleton = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let mut binary = vec![0x89u8, b'P', b'N', b'G', 0xff, 0x00];
    binary.extend_from_slice(b"@app.name@");
    write(skeleton.path(), "src/main/groovy/@codegen.defaultPackage.path@/Application.groovy", "package @codegen.defaultPackage@\n");
    write(skeleton.path(), "assets/images/@app.name@.png", &binary);
    write(skeleton.path(), "assets/images/Logo.PNG", &binary);
    write(skeleton.path(), "src/test/groovy/.gitkeep", "");
    write(skeleton.path(), "README.md", "# @codegen.projectNaturalName@\n");

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let web = profile("web", skeleton.path());
    materializer.overlay_profile(&web, &web).unwrap();

    let source = fs::read_to_string(target.path().join("src/main/groovy/org/acme/Application.groovy")).unwrap();
    assert_eq!(source, "package org.acme\n");
    assert_eq!(fs::read(target.path().join("assets/images/shop.png")).unwrap(), binary);
    assert_eq!(fs::read(target.path().join("assets/images/Logo.PNG")).unwrap(), binary);
    assert_eq!(fs::read_to_string(target.path().join("README.md")).unwrap(), "# Shop\n");
    assert!(target.path().join("src/test/groovy").is_dir());
    assert!(!target.path().join("src/test/groovy/.gitkeep").exists());
}

#[test]
fn test_configured_excludes_and_ignore_file() {
    let skeleton = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(skeleton.path(), ".gitignore", "build/\n");
    write(skeleton.path(), "notes/draft.orig", "skip me");
    write(skeleton.path(), "notes/keep.txt", "keep me");

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let mut web = profile("web", skeleton.path());
    web.skeleton_excludes = vec!["**/*.orig".to_string()];
    materializer.overlay_profile(&web, &web).unwrap();

    assert_eq!(fs::read_to_string(target.path().join(".gitignore")).unwrap(), "build/\n");
    assert!(target.path().join("notes/keep.txt").exists());
    assert!(!target.path().join("notes/draft.orig").exists());
}

#[test]
fn test_requested_profile_excludes_apply_to_parent_skeletons() {
    let base = TempDir::new().unwrap();
    let web = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(base.path(), "views.txt", "base views");
    write(base.path(), "shared.txt", "shared");
    write(web.path(), "web.txt", "web");

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let mut base_profile = profile("base", base.path());
    base_profile.skeleton_excludes = vec!["web.txt".to_string()];
    let mut web_profile = profile("web", web.path());
    web_profile.skeleton_excludes = vec!["views.txt".to_string()];

    materializer.overlay_profile(&base_profile, &web_profile).unwrap();
    materializer.overlay_profile(&web_profile, &web_profile).unwrap();

    assert!(!target.path().join("views.txt").exists());
    assert!(target.path().join("shared.txt").exists());
    assert!(target.path().join("web.txt").exists());
}

#[test]
fn test_build_file_concatenated_for_merge_profiles() {
    let base = TempDir::new().unwrap();
    let web = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(base.path(), "build.gradle", "// base @app.name@\n");
    write(web.path(), "build.gradle", "// web\n");

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let base_profile = profile("base", base.path());
    let mut web_profile = profile("web", web.path());
    web_profile.build_merge = vec!["web".to_string()];

    materializer.overlay_profile(&base_profile, &web_profile).unwrap();
    materializer.overlay_profile(&web_profile, &web_profile).unwrap();

    let build = fs::read_to_string(target.path().join("build.gradle")).unwrap();
    assert!(build.starts_with("// base @app.name@\n"));
    assert!(build.ends_with("// web\n"));
    assert!(!target.path().join("build.gradle.concat").exists());
}

#[test]
fn test_build_file_kept_for_other_profiles() {
    let base = TempDir::new().unwrap();
    let web = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(base.path(), "build.gradle", "// base\n");
    write(web.path(), "build.gradle", "// web\n");

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let base_profile = profile("base", base.path());
    let web_profile = profile("web", web.path());

    materializer.overlay_profile(&base_profile, &web_profile).unwrap();
    materializer.overlay_profile(&web_profile, &web_profile).unwrap();

    let build = fs::read_to_string(target.path().join("build.gradle")).unwrap();
    assert_eq!(build, "// base\n");
}

#[test]
fn test_configuration_grows_by_document() {
    let skeletons: Vec<TempDir> = (0..3).map(|_| TempDir::new().unwrap()).collect();
    let target = TempDir::new().unwrap();
    write(skeletons[0].path(), CONFIG, "app:\n  name: '@app.name@'\n");
    write(skeletons[1].path(), CONFIG, "server:\n  port: 8080\n");
    write(skeletons[2].path(), CONFIG, "logging:\n  level: info\n");

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let profiles: Vec<Profile> = ["base", "rest", "web"]
        .iter()
        .zip(&skeletons)
        .map(|(name, dir)| profile(name, dir.path()))
        .collect();
    let requested = profiles.last().unwrap();
    for overlay in &profiles {
        materializer.overlay_profile(overlay, requested).unwrap();
    }

    let config_path = target.path().join(CONFIG);
    let config = fs::read_to_string(&config_path).unwrap();
    assert!(config.starts_with("---\napp:\n  name: 'shop'\n"));
    assert!(config.ends_with("logging:\n  level: info\n"));
    assert_eq!(config.lines().filter(|l| *l == "---").count(), 3);
    assert_eq!(documents(&config_path, &config).unwrap().len(), 3);
}

#[test]
fn test_feature_fragment_without_configuration_becomes_the_file() {
    let json = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(json.path(), CONFIG, "json: true\n");

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let web_profile = profile("web", &target.path().join("no-skeleton"));
    let feature = Feature {
        name: "json".to_string(),
        description: String::new(),
        skeleton: SkeletonSource::Directory(PathBuf::from(json.path())),
        dependencies: Vec::new(),
        build_plugins: Vec::new(),
    };

    materializer.overlay_feature(&feature, &web_profile).unwrap();

    assert_eq!(fs::read_to_string(target.path().join(CONFIG)).unwrap(), "json: true\n");
}

#[test]
fn test_feature_fragment_is_appended() {
    let web = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(web.path(), CONFIG, "app: web\n");
    write(json.path(), CONFIG, "json: true\n");
    write(json.path(), "src/main/resources/json.properties", "pretty=@app.name@\n");

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let web_profile = profile("web", web.path());
    let feature = Feature {
        name: "json".to_string(),
        description: String::new(),
        skeleton: SkeletonSource::Directory(PathBuf::from(json.path())),
        dependencies: Vec::new(),
        build_plugins: Vec::new(),
    };

    materializer.overlay_profile(&web_profile, &web_profile).unwrap();
    materializer.overlay_feature(&feature, &web_profile).unwrap();

    let config = fs::read_to_string(target.path().join(CONFIG)).unwrap();
    assert_eq!(config, "---\napp: web\n\n---\njson: true\n");
    let properties =
        fs::read_to_string(target.path().join("src/main/resources/json.properties")).unwrap();
    assert_eq!(properties, "pretty=shop\n");
}

#[test]
fn test_missing_skeleton_is_skipped() {
    let target = TempDir::new().unwrap();
    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let ghost = profile("ghost", &target.path().join("does-not-exist"));

    materializer.overlay_profile(&ghost, &ghost).unwrap();
    assert_eq!(fs::read_dir(target.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_wrapper_is_made_executable() {
    use std::os::unix::fs::PermissionsExt;

    let skeleton = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(skeleton.path(), "gradlew", "#!/bin/sh\n");
    fs::set_permissions(skeleton.path().join("gradlew"), fs::Permissions::from_mode(0o644)).unwrap();

    let context = context();
    let renderer = TokenRenderer::new();
    let materializer = SkeletonMaterializer::new(target.path(), &renderer, &context);
    let web = profile("web", skeleton.path());
    materializer.overlay_profile(&web, &web).unwrap();

    let mode = fs::metadata(target.path().join("gradlew")).unwrap().permissions().mode();
    assert_eq!(mode & 0o100, 0o100);
}
