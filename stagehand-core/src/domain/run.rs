// stagehand-core/src/domain/run.rs

use serde::{Deserialize, Serialize};

/// Terminal state of one step within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Succeeded,
    Failed,
    /// Never started because an upstream step failed.
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub name: String,
    pub status: StepStatus,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepOutcome {
    pub fn succeeded(name: &str, attempts: u32) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Succeeded,
            attempts,
            error: None,
        }
    }

    pub fn failed(name: &str, attempts: u32, error: String) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Failed,
            attempts,
            error: Some(error),
        }
    }

    pub fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Skipped,
            attempts: 0,
            error: None,
        }
    }
}

/// Summary of one run, persisted as `run_results.json` under the files dir.
///
/// The signed URL itself is deliberately absent: it lives only for the
/// duration of the run that minted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub flow: String,
    pub run_id: String,
    pub started_at: String,
    pub duration_secs: f64,
    pub success: bool,
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    pub fn failed_step(&self) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.status == StepStatus::Failed)
    }
}

/// Mutable scratch state threaded through a single run.
///
/// This is the only channel between steps: the signer deposits the URL,
/// the notifier picks it up.
#[derive(Debug, Default)]
pub struct RunContext {
    pub signed_url: Option<String>,
}
