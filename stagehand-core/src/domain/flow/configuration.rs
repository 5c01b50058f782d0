// stagehand-core/src/domain/flow/configuration.rs

use super::StepSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// How the rendered SQL checker reacts to a statement it cannot parse.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LintMode {
    Off,
    #[default]
    Warn,
    Strict,
}

/// The complete, immutable definition of a flow.
///
/// Loaded once from `flow.yaml`, validated, then passed by reference into
/// every step. Steps never mutate it and never reach for globals.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct FlowConfig {
    pub name: String,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub connections: ConnectionRefs,

    #[serde(rename = "config-paths", default)]
    pub config_paths: Vec<String>,

    #[serde(rename = "queries-dir", default = "default_queries_dir")]
    pub queries_dir: String,

    #[serde(rename = "files-dir", default = "default_files_dir")]
    pub files_dir: String,

    #[validate(nested)]
    pub params: RunParams,

    #[validate(nested)]
    #[serde(default)]
    pub link: LinkConfig,

    #[validate(nested)]
    pub notify: NotifyConfig,

    #[validate(nested)]
    #[serde(default)]
    pub retry: RetryPolicy,

    #[serde(default)]
    pub lint: LintMode,

    #[validate(length(min = 1, message = "A flow needs at least one step"))]
    pub steps: Vec<StepSpec>,
}

/// Names of the connection profiles a flow resolves at run time.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConnectionRefs {
    pub warehouse: String,
    #[serde(rename = "object-store")]
    pub object_store: String,
    pub webhook: String,
}

/// The one fixed mapping of run parameters, interpolated into SQL templates
/// as `{{ params.* }}`. Field names are the template keys, so they stay
/// snake_case on the wire.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct RunParams {
    #[validate(length(min = 1, message = "db must not be empty"))]
    pub db: String,
    pub schema_origin: String,
    pub schema_destination: String,
    pub stage: String,
    pub path: String,
    #[validate(length(min = 1, message = "bucket must not be empty"))]
    pub bucket: String,
    #[validate(length(min = 1, message = "filename must not be empty"))]
    pub filename: String,
}

/// Pre-signed link settings.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct LinkConfig {
    #[serde(rename = "expires-in-secs", default = "default_expires_in_secs")]
    #[validate(range(min = 1, message = "expires-in-secs must be at least one second"))]
    pub expires_in_secs: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            expires_in_secs: default_expires_in_secs(),
        }
    }
}

/// Webhook notification settings. The message is a template over `{{ url }}`.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct NotifyConfig {
    #[validate(length(min = 1, message = "notify.message must not be empty"))]
    pub message: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Uniform retry budget applied to every step.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct RetryPolicy {
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    #[validate(range(min = 1, message = "max-attempts must be at least 1"))]
    pub max_attempts: u32,

    #[serde(rename = "delay-secs", default)]
    pub delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_secs: 0,
        }
    }
}

impl FlowConfig {
    /// Object key of the exported file inside the bucket.
    pub fn object_key(&self) -> String {
        format!("{}/{}", self.params.path, self.params.filename)
    }

    /// The context every SQL template renders against: `{{ params.* }}`.
    pub fn template_context(&self) -> serde_json::Value {
        serde_json::json!({ "params": &self.params })
    }

    /// Where SQL templates live, resolved against the flow directory.
    pub fn queries_dir_path(&self, flow_dir: &Path) -> PathBuf {
        resolve(flow_dir, &self.queries_dir)
    }

    /// Where run artifacts (compiled SQL, run report) land.
    pub fn files_dir_path(&self, flow_dir: &Path) -> PathBuf {
        resolve(flow_dir, &self.files_dir)
    }
}

fn resolve(flow_dir: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        flow_dir.join(path)
    }
}

fn default_queries_dir() -> String {
    "queries".to_string()
}
fn default_files_dir() -> String {
    "target".to_string()
}
fn default_expires_in_secs() -> u64 {
    // 7 days, the SigV4 ceiling
    604_800
}
fn default_max_attempts() -> u32 {
    3
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::flow::StepAction;
    use anyhow::Result;
    use validator::Validate;

    const MINIMAL_FLOW: &str = r#"
name: balance_export
owner: data-finance

connections:
  warehouse: snowflake_conn_id
  object-store: aws_conn_id
  webhook: slack_webhook_conn

params:
  db: ANALYTICS
  schema_origin: RAW
  schema_destination: SILVER
  stage: "@ANALYTICS.RAW.EXPORT_STAGE"
  path: output_files
  bucket: exports-bucket
  filename: balance.csv

notify:
  message: "Done: {{ url }}"

steps:
  - name: create_table
    kind: warehouse_sql
    template: create_table.sql
  - name: load_to_s3
    kind: warehouse_sql
    template: load_to_s3.sql
    depends-on: [create_table]
  - name: generate_presigned_url
    kind: presign_get
    depends-on: [load_to_s3]
  - name: notify_slack
    kind: notify
    depends-on: [generate_presigned_url]
"#;

    #[test]
    fn test_parse_minimal_flow_with_defaults() -> Result<()> {
        let config: FlowConfig = serde_yaml::from_str(MINIMAL_FLOW)?;

        assert_eq!(config.name, "balance_export");
        assert_eq!(config.queries_dir, "queries");
        assert_eq!(config.files_dir, "target");
        assert_eq!(config.link.expires_in_secs, 604_800);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay_secs, 0);
        assert_eq!(config.lint, LintMode::Warn);
        assert_eq!(config.steps.len(), 4);

        match &config.steps[1].action {
            StepAction::WarehouseSql { template } => assert_eq!(template, "load_to_s3.sql"),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(config.steps[2].action, StepAction::PresignGet);
        assert_eq!(config.steps[2].depends_on, vec!["load_to_s3".to_string()]);

        config.validate()?;
        Ok(())
    }

    #[test]
    fn test_object_key_joins_path_and_filename() -> Result<()> {
        let config: FlowConfig = serde_yaml::from_str(MINIMAL_FLOW)?;
        assert_eq!(config.object_key(), "output_files/balance.csv");
        Ok(())
    }

    #[test]
    fn test_template_context_exposes_params() -> Result<()> {
        let config: FlowConfig = serde_yaml::from_str(MINIMAL_FLOW)?;
        let context = config.template_context();
        assert_eq!(context["params"]["db"], "ANALYTICS");
        assert_eq!(context["params"]["stage"], "@ANALYTICS.RAW.EXPORT_STAGE");
        Ok(())
    }

    #[test]
    fn test_dir_resolution_absolute_vs_relative() -> Result<()> {
        let mut config: FlowConfig = serde_yaml::from_str(MINIMAL_FLOW)?;
        let flow_dir = Path::new("/srv/flows/balance");

        assert_eq!(
            config.queries_dir_path(flow_dir),
            PathBuf::from("/srv/flows/balance/queries")
        );

        config.files_dir = "/tmp/balance".to_string();
        assert_eq!(config.files_dir_path(flow_dir), PathBuf::from("/tmp/balance"));
        Ok(())
    }

    #[test]
    fn test_validation_rejects_zero_expiry() -> Result<()> {
        let mut config: FlowConfig = serde_yaml::from_str(MINIMAL_FLOW)?;
        config.link.expires_in_secs = 0;
        assert!(config.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_validation_rejects_empty_steps() -> Result<()> {
        let mut config: FlowConfig = serde_yaml::from_str(MINIMAL_FLOW)?;
        config.steps.clear();
        assert!(config.validate().is_err());
        Ok(())
    }
}
