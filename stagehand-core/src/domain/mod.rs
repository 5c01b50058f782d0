pub mod error;
pub mod flow;
pub mod run;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use flow::{FlowConfig, FlowPlan, LintMode, StepAction, StepSpec};
pub use run::{RunReport, StepOutcome, StepStatus};
