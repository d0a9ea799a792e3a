//! Code generation module
//!
//! Renders built [`ModelDef`](crate::ModelDef)s into go-pg model source
//! through handlebars templates.

use crate::{GenError, Result};
use handlebars::Handlebars;
use serde::Serialize;

pub mod go;
pub mod templates;

pub use go::{model_file_name, GoModelRenderer, OutputMode, RenderedFile};

/// Template-based code generator
pub struct TemplateGenerator {
    handlebars: Handlebars<'static>,
}

impl TemplateGenerator {
    /// Create a new template generator
    ///
    /// Output is source code, so HTML escaping is disabled and missing
    /// variables are errors instead of empty strings.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self { handlebars }
    }

    /// Register a template
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| GenError::Render(format!("Template registration failed: {}", e)))?;
        Ok(())
    }

    /// Render a template with context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| GenError::Render(format!("Template rendering failed: {}", e)))
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_does_not_escape() {
        let mut generator = TemplateGenerator::new();
        generator.register_template("tag", "{{tag}}").unwrap();

        let out = generator.render("tag", &json!({ "tag": "`sql:\"id\"`" })).unwrap();
        assert_eq!(out, "`sql:\"id\"`");
    }

    #[test]
    fn test_strict_mode_reports_missing_variables() {
        let mut generator = TemplateGenerator::new();
        generator.register_template("t", "{{missing}}").unwrap();

        assert!(matches!(generator.render("t", &json!({})), Err(GenError::Render(_))));
    }

    #[test]
    fn test_invalid_template_is_render_error() {
        let mut generator = TemplateGenerator::new();
        assert!(matches!(
            generator.register_template("broken", "{{#each items}}"),
            Err(GenError::Render(_))
        ));
    }
}
