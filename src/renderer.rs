//! Token substitution applied to skeleton content and file names.
use crate::context::VariableContext;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Variables available to the template
    fn render(&self, template: &str, context: &VariableContext) -> String;
}

/// Replaces every `@key@` token with the value of `key`.
///
/// Unknown tokens are left in place; the build descriptor patch pass resolves
/// block tokens after all overlays are applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenRenderer;

impl TokenRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TokenRenderer {
    fn render(&self, template: &str, context: &VariableContext) -> String {
        if !template.contains('@') {
            return template.to_string();
        }
        context.iter().fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("@{key}@"), value)
        })
    }
}
