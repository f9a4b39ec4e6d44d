//! Derivation of the application name, package name and naming variants
//! from the raw command-line input.

use std::sync::LazyLock;

use cruet::Inflector;
use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

static DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new("-+").unwrap());

static PACKAGE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*$").unwrap());

const RESERVED_WORDS: [&str; 53] = [
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "try", "void", "volatile", "while", "true", "false",
    "null",
];

/// Resolved names of the project being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    pub app_name: String,
    pub package: String,
    pub class_name: String,
    pub natural_name: String,
    pub script_name: String,
    pub snake_case_name: String,
}

impl Identifiers {
    /// Resolves the identifiers from the application-name token.
    ///
    /// # Arguments
    /// * `token` - Optional `app` or `group.app` argument
    /// * `inplace` - Whether the project is generated into the current directory
    /// * `current_dir_name` - Name of the current directory, used when `inplace` is set
    ///
    /// # Errors
    /// * `Error::MissingTarget` when no token is given and `inplace` is not set
    /// * `Error::InvalidPackageName` when the package is not a legal identifier
    pub fn derive(token: Option<&str>, inplace: bool, current_dir_name: &str) -> Result<Self> {
        let token = token.map(str::trim).filter(|t| !t.is_empty());

        let (app_name, package) = match (inplace, token) {
            (true, None) => (current_dir_name.to_string(), derive_package(current_dir_name)?),
            (true, Some(group)) => (current_dir_name.to_string(), group.to_string()),
            (false, None) => return Err(Error::MissingTarget),
            (false, Some(token)) => match token.rsplit_once('.') {
                None => (token.to_string(), derive_package(token)?),
                Some((group, app)) => (app.to_string(), group.to_string()),
            },
        };

        if app_name.is_empty() || !is_valid_package(&package) {
            return Err(Error::InvalidPackageName { app_name });
        }

        debug!("Resolved application '{}' in package '{}'.", app_name, package);
        Ok(Self::from_names(app_name, package))
    }

    fn from_names(app_name: String, package: String) -> Self {
        let class_name = app_name.to_pascal_case();
        let natural_name = class_name.to_title_case();
        let script_name = class_name.to_kebab_case();
        let snake_case_name = class_name.to_snake_case();
        Self { app_name, package, class_name, natural_name, script_name, snake_case_name }
    }

    /// Package name with `/` in place of `.`.
    pub fn package_path(&self) -> String {
        self.package.replace('.', "/")
    }
}

/// Derives a package name from an application name.
///
/// `foo-bar` becomes `foo.bar`, `FooBar` becomes `foobar`.
pub fn derive_package(app_name: &str) -> Result<String> {
    let package = DASHES
        .split(app_name)
        .map(|segment| {
            segment
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".");

    if is_valid_package(&package) {
        Ok(package)
    } else {
        Err(Error::InvalidPackageName { app_name: app_name.to_string() })
    }
}

/// Checks that every `.`-separated segment is a non-reserved identifier.
pub fn is_valid_package(package: &str) -> bool {
    !package.is_empty()
        && package
            .split('.')
            .all(|segment| PACKAGE_SEGMENT.is_match(segment) && !RESERVED_WORDS.contains(&segment))
}
