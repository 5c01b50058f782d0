// stagehand-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Circular dependency detected involving: {0}")]
    #[diagnostic(
        code(stagehand::domain::cycle),
        help("Check the depends-on entries of your steps in flow.yaml.")
    )]
    CircularDependency(String),

    #[error("Step '{step}' depends on unknown step '{dependency}'")]
    #[diagnostic(code(stagehand::domain::unknown_dependency))]
    UnknownDependency { step: String, dependency: String },

    #[error("Duplicate step name: '{0}'")]
    #[diagnostic(
        code(stagehand::domain::duplicate_step),
        help("Every step in a flow must carry a unique name.")
    )]
    DuplicateStep(String),

    #[error("Step '{0}' would notify before any link is signed")]
    #[diagnostic(
        code(stagehand::domain::notify_before_link),
        help("A notify step must run after a presign_get step, directly or transitively.")
    )]
    NotifyBeforeLink(String),

    #[error("Step '{0}' needs a signed link but none was produced")]
    #[diagnostic(code(stagehand::domain::missing_link))]
    MissingSignedLink(String),

    #[error("Statement for step '{step}' rejected: {reason}")]
    #[diagnostic(
        code(stagehand::domain::statement_rejected),
        help("Fix the SQL template, or set lint to 'warn' to execute anyway.")
    )]
    StatementRejected { step: String, reason: String },
}
