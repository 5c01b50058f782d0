use crate::error::StagehandError;

pub trait TemplateEngine: Send + Sync {
    /// Renders a named template out of the flow's queries directory.
    fn render_template(
        &self,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<String, StagehandError>;

    /// Renders an inline template string (notification messages).
    fn render_str(
        &self,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, StagehandError>;
}
