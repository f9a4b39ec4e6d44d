//! Common constants used throughout the stencil application.

/// Profile selected when `--profile` is not given
pub const DEFAULT_PROFILE: &str = "web";

/// Version substituted when the tool's own version is unavailable
pub const FALLBACK_VERSION: &str = "0.0.0-SNAPSHOT";

/// Profile descriptor file name inside a profile directory
pub const PROFILE_FILE: &str = "profile.yml";

/// Feature descriptor file name inside a feature directory
pub const FEATURE_FILE: &str = "feature.yml";

/// Directory holding the features of a profile
pub const FEATURES_DIR: &str = "features";

/// Default skeleton directory inside a profile, feature or archive
pub const SKELETON_DIR: &str = "skeleton";

/// Build descriptor, relative to the project root
pub const BUILD_FILE: &str = "build.gradle";

/// Multi-document application configuration, relative to the project root
pub const APPLICATION_CONFIG: &str = "grails-app/conf/application.yml";

/// Ignore-pattern file copied from the skeleton root
pub const IGNORE_FILE: &str = ".gitignore";

/// Marker keeping otherwise empty skeleton directories under version control
pub const FILLER_FILE: &str = ".gitkeep";

/// Executable patterns used when a profile declares none
pub const DEFAULT_EXECUTABLES: [&str; 1] = ["gradlew"];

/// Files with these extensions are copied verbatim
pub const BINARY_EXTENSIONS: [&str; 10] =
    ["png", "gif", "jpg", "jpeg", "ico", "icns", "pdf", "zip", "jar", "class"];

/// YAML document separator
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Scope routed to the build script classpath
pub const BUILD_SCOPE: &str = "build";

/// Marker in a version meaning "no explicit version"
pub const BOM_MARKER: &str = "BOM";

/// Build descriptor tokens replaced with the rendered blocks
pub const PLUGINS_TOKEN: &str = "@buildPlugins@";
pub const DEPENDENCIES_TOKEN: &str = "@dependencies@";
pub const BUILD_DEPENDENCIES_TOKEN: &str = "@buildDependencies@";
