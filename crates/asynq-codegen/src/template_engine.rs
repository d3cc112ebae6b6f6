//! Template engine for code generation using Handlebars.
//!
//! Provides a wrapper around Handlebars with the bundled `tasks` template
//! pre-registered. The engine knows nothing about task queues: it renders
//! any registered template against any serializable context.
//!
//! Output is source code, so HTML escaping is disabled.
//!
//! # Helpers
//!
//! - `snake_case`: `{{snake_case declared_name}}` renders `send_email`
//! - `upper_snake_case`: `{{upper_snake_case declared_name}}` renders `SEND_EMAIL`
//!
//! # Examples
//!
//! ```
//! use asynq_codegen::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "fn {{snake_case name}}() {}").unwrap();
//! let rendered = engine.render("greeting", &json!({"name": "SayHello"})).unwrap();
//! assert_eq!(rendered, "fn say_hello() {}");
//! ```

use asynq_codegen_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

/// Name of the bundled template rendering a `GenerationModel`.
pub const TASKS_TEMPLATE: &str = "tasks";

mod helpers {
    use asynq_codegen_core::{to_snake_case, to_upper_snake_case};
    use handlebars::handlebars_helper;

    handlebars_helper!(snake_case: |value: str| to_snake_case(value));
    handlebars_helper!(upper_snake_case: |value: str| to_upper_snake_case(value));
}

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with the bundled templates registered.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("snake_case", Box::new(helpers::snake_case));
        handlebars.register_helper("upper_snake_case", Box::new(helpers::upper_snake_case));

        let mut engine = Self { handlebars };
        engine.register_template_string(
            TASKS_TEMPLATE,
            include_str!("../templates/tasks.rs.hbs"),
        )?;

        Ok(engine)
    }

    /// Renders a registered template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - The template references a field missing from the context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::Render {
                name: template_name.to_string(),
                message: e.to_string(),
            })
    }

    /// Registers a template from a string, replacing any template of the
    /// same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::Template {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Registers a template read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the file cannot be read or parsed.
    pub fn register_template_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let template = std::fs::read_to_string(path).map_err(|e| Error::Template {
            name: path.display().to_string(),
            message: format!("failed to read template: {e}"),
        })?;

        tracing::debug!("Registering template '{name}' from {}", path.display());

        self.register_template_string(name, &template)
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
