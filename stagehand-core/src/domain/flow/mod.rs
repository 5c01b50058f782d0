pub mod configuration;
pub mod plan;

pub use configuration::{
    ConnectionRefs, FlowConfig, LinkConfig, LintMode, NotifyConfig, RetryPolicy, RunParams,
};
pub use plan::FlowPlan;

use serde::{Deserialize, Serialize};

/// What a step does when its turn comes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAction {
    /// Render a SQL template and execute it on the warehouse connection.
    WarehouseSql { template: String },
    /// Mint a time-boxed pre-signed GET URL for the flow's output object.
    PresignGet,
    /// Render the notification message with the signed URL and post it.
    Notify,
}

/// One named unit of work inside a flow.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StepSpec {
    pub name: String,

    #[serde(flatten)]
    pub action: StepAction,

    #[serde(rename = "depends-on", default)]
    pub depends_on: Vec<String>,
}
