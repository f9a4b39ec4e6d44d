//! Template variables resolved once per invocation.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::constants::FALLBACK_VERSION;
use crate::identifier::Identifiers;

/// Ordered mapping from variable name to its resolved value.
///
/// Every key `k` is substituted wherever `@k@` appears in skeleton content,
/// skeleton file names and, at the end, throughout the target tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableContext {
    variables: IndexMap<String, String>,
}

impl VariableContext {
    /// Builds the context for a project.
    ///
    /// # Arguments
    /// * `ids` - Resolved project identifiers
    /// * `profile` - Name of the requested profile
    /// * `version` - Version of the running tool, if known
    pub fn new(ids: &Identifiers, profile: &str, version: Option<&str>) -> Self {
        let mut context = Self::default();
        context.insert("APPNAME", &ids.app_name);
        context.insert("app.name", &ids.app_name);
        context.insert("app.group", &ids.package);
        context.insert("codegen.defaultPackage", &ids.package);
        context.insert("codegen.defaultPackage.path", ids.package_path());
        context.insert("codegen.projectClassName", &ids.class_name);
        context.insert("codegen.projectNaturalName", &ids.natural_name);
        context.insert("codegen.projectName", &ids.script_name);
        context.insert("codegen.projectSnakeCaseName", &ids.snake_case_name);
        context.insert("profile", profile);
        context.insert("version", version.filter(|v| !v.is_empty()).unwrap_or(FALLBACK_VERSION));

        if log::log_enabled!(log::Level::Debug) {
            let dump = serde_json::to_string_pretty(&context).unwrap_or_default();
            debug!("Template variables: {}", dump);
        }
        context
    }

    /// Sets a variable, replacing any previous value for the key.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
