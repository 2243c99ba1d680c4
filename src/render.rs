//! Template boundary.
//!
//! The rest of the system depends only on `render(name, context)`; the
//! Handlebars engine and the template sources (compiled in via
//! `include_str!`) are an implementation detail of this module.

use handlebars::Handlebars;
use serde_json::Value;

use crate::errors::AppError;

/// Renders named HTML templates from a `RenderContext` value.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();

        let templates = [
            ("home", include_str!("../templates/home.hbs")),
            ("results", include_str!("../templates/results.hbs")),
            (
                "forecast_results",
                include_str!("../templates/forecast_results.hbs"),
            ),
            (
                "historical_results",
                include_str!("../templates/historical_results.hbs"),
            ),
        ];

        for (name, source) in templates {
            registry
                .register_template_string(name, source)
                .map_err(|e| {
                    AppError::InternalError(format!("failed to register template {}: {}", name, e))
                })?;
        }

        Ok(Self { registry })
    }

    /// Render the named template with the given context.
    pub fn render(&self, name: &str, context: &Value) -> Result<String, AppError> {
        self.registry
            .render(name, context)
            .map_err(|e| AppError::InternalError(format!("template {} failed: {}", name, e)))
    }
}
