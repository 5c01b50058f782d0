// stagehand-core/src/infrastructure/compiler/jinja.rs

// This script turns "raw" SQL templates ({{ params.db }}, {{ params.stage }}, ...)
// into statements the warehouse can execute. It is the bridge between
// "Template Code" and "Standard SQL."

use crate::application::ports::TemplateEngine;
use crate::error::StagehandError;
use crate::infrastructure::error::InfrastructureError;
use minijinja::{Environment, UndefinedBehavior, path_loader};
use std::path::Path;

pub struct SqlRenderer {
    env: Environment<'static>,
}

impl SqlRenderer {
    /// Builds a renderer over one queries directory. Templates are addressed
    /// by their file name relative to that directory.
    pub fn from_dir(queries_dir: &Path) -> Self {
        let mut env = Environment::new();

        // A typo'd parameter must fail the render, never silently produce
        // SQL with a hole in it.
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_loader(path_loader(queries_dir.to_path_buf()));

        Self { env }
    }
}

impl TemplateEngine for SqlRenderer {
    fn render_template(
        &self,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<String, StagehandError> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(InfrastructureError::TemplateError)?;
        tmpl.render(context)
            .map_err(|e| InfrastructureError::TemplateError(e).into())
    }

    fn render_str(
        &self,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, StagehandError> {
        self.env
            .render_str(template, context)
            .map_err(|e| InfrastructureError::TemplateError(e).into())
    }
}
