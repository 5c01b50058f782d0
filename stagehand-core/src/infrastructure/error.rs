// stagehand-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(stagehand::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(stagehand::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Flow configuration not found at '{0}'")]
    #[diagnostic(code(stagehand::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Connection '{0}' not found in connections.yml")]
    #[diagnostic(
        code(stagehand::infra::connection_missing),
        help("Declare the profile in connections.yml or fix the name in flow.yaml.")
    )]
    ConnectionNotFound(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(stagehand::infra::template),
        help("Check your Jinja syntax ({{ ... }}) and that every referenced parameter exists.")
    )]
    TemplateError(#[from] minijinja::Error),

    #[error("SQL template '{template}' for step '{step}' not found")]
    #[diagnostic(
        code(stagehand::infra::template_missing),
        help("Templates are discovered under the flow's queries directory.")
    )]
    TemplateNotFound { template: String, step: String },

    // --- EXTERNAL SERVICES ---
    #[error("HTTP Transport Error: {0}")]
    #[diagnostic(
        code(stagehand::infra::http),
        help("Check network reachability and the connection profile host.")
    )]
    HttpError(#[from] reqwest::Error),

    #[error("Warehouse rejected statement ({status}): {body}")]
    #[diagnostic(
        code(stagehand::infra::warehouse),
        help("Inspect the compiled SQL under the files dir and the response body.")
    )]
    WarehouseError { status: u16, body: String },

    #[error("Signing Error: {0}")]
    #[diagnostic(
        code(stagehand::infra::signing),
        help("Check the object-store credentials and that expires-in-secs is within the 7-day SigV4 ceiling.")
    )]
    SigningError(String),

    #[error("Webhook rejected message ({status}): {body}")]
    #[diagnostic(code(stagehand::infra::webhook))]
    WebhookError { status: u16, body: String },
}
