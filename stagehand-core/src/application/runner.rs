// stagehand-core/src/application/runner.rs

use std::path::Path;
use std::time::Duration;

use crate::error::StagehandError;

// Application Services
use crate::application::lint::lint_statement;
use crate::application::ports::TemplateEngine;

// Domain
use crate::domain::error::DomainError;
use crate::domain::flow::{FlowConfig, FlowPlan, LintMode, StepAction, StepSpec};
use crate::domain::run::{RunContext, RunReport, StepOutcome, StepStatus};

// Ports
use crate::ports::connector::WarehouseConnector;
use crate::ports::notifier::Notifier;
use crate::ports::signer::LinkSigner;

use tracing::{info, warn};

/// Runs one flow front to back: plan, render, execute, sign, notify.
///
/// Steps run strictly one after the other. The first step that exhausts
/// its retry budget halts the run; everything downstream is recorded as
/// skipped, and the report still lands on disk.
pub async fn run_flow(
    config: &FlowConfig,
    flow_dir: &Path,
    template_engine: &dyn TemplateEngine,
    connector: &dyn WarehouseConnector,
    signer: &dyn LinkSigner,
    notifier: &dyn Notifier,
) -> Result<RunReport, StagehandError> {
    println!("🚀 Starting Flow Orchestrator...");
    let start_time = std::time::Instant::now();
    let started_at = chrono::Utc::now();

    // 1. SCHEDULING (Domain Pure Logic -> total order)
    let plan = FlowPlan::sequence(config)?;
    println!("📝 Execution Plan: {} steps, strictly sequential", plan.len());

    // 2. SETUP (Infra/IO)
    let files_dir = config.files_dir_path(flow_dir);
    let compiled_dir = files_dir.join("compiled");
    if !compiled_dir.exists() {
        std::fs::create_dir_all(&compiled_dir)?;
    }

    // Strict lint can be forced from the outside: STAGEHAND_STRICT=1 stagehand run
    let env_strict = std::env::var("STAGEHAND_STRICT").is_ok();
    let lint_mode = if env_strict {
        LintMode::Strict
    } else {
        config.lint
    };
    if lint_mode == LintMode::Strict {
        println!("    🔒 Strict Lint Mode: ON");
    }

    let ctx = StepContext {
        config,
        lint_mode,
        compiled_dir: &compiled_dir,
        renderer: template_engine,
        connector,
        signer,
        notifier,
    };

    // 3. EXECUTION LOOP (sequential, fail fast)
    let mut run_state = RunContext::default();
    let mut outcomes: Vec<StepOutcome> = Vec::with_capacity(plan.len());
    let mut halted = false;

    info!(flow = %config.name, steps = plan.len(), "Starting flow run");

    for step in plan.steps() {
        if halted {
            outcomes.push(StepOutcome::skipped(&step.name));
            continue;
        }

        let mut attempts = 0u32;
        let outcome = loop {
            attempts += 1;
            match execute_step(step, &ctx, &mut run_state).await {
                Ok(()) => break StepOutcome::succeeded(&step.name, attempts),
                Err(e) if attempts < config.retry.max_attempts => {
                    warn!(step = %step.name, attempt = attempts, error = %e, "Step failed, retrying");
                    if config.retry.delay_secs > 0 {
                        tokio::time::sleep(Duration::from_secs(config.retry.delay_secs)).await;
                    }
                }
                Err(e) => break StepOutcome::failed(&step.name, attempts, e.to_string()),
            }
        };

        match outcome.status {
            StepStatus::Succeeded => println!("    ✅ {}", step.name),
            _ => {
                eprintln!(
                    "    ❌ {}: {}",
                    step.name,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
                halted = true;
            }
        }
        outcomes.push(outcome);
    }

    // 4. FINALIZE (the report lands whether the run succeeded or not)
    let duration = start_time.elapsed();
    let report = RunReport {
        flow: config.name.clone(),
        run_id: started_at.format("%Y%m%dT%H%M%SZ").to_string(),
        started_at: started_at.to_rfc3339(),
        duration_secs: duration.as_secs_f64(),
        success: !halted,
        steps: outcomes,
    };
    save_json(&files_dir.join("run_results.json"), &report)?;

    if report.success {
        println!(
            "✨ Done in {:.2}s. Executed {} steps.",
            duration.as_secs_f64(),
            report.steps.len()
        );
    }

    Ok(report)
}

// --- HELPER FUNCTIONS ---

// Context struct to reduce argument count for execute_step
struct StepContext<'a> {
    config: &'a FlowConfig,
    lint_mode: LintMode,
    compiled_dir: &'a Path,
    renderer: &'a dyn TemplateEngine,
    connector: &'a dyn WarehouseConnector,
    signer: &'a dyn LinkSigner,
    notifier: &'a dyn Notifier,
}

/// Executes a single step: Render -> Lint -> Warehouse / Sign / Notify.
async fn execute_step(
    step: &StepSpec,
    ctx: &StepContext<'_>,
    run_state: &mut RunContext,
) -> Result<(), StagehandError> {
    match &step.action {
        StepAction::WarehouseSql { template } => {
            // A. Compilation Jinja
            let sql = ctx
                .renderer
                .render_template(template, &ctx.config.template_context())?;

            // B. Lint local avant d'occuper le warehouse
            lint_statement(ctx.lint_mode, &step.name, &sql)?;

            // LOG: Compiled
            crate::infrastructure::fs::atomic_write(
                ctx.compiled_dir.join(format!("{}.sql", step.name)),
                &sql,
            )?;

            // C. Execution
            ctx.connector.execute(&sql).await?;
        }
        StepAction::PresignGet => {
            let key = ctx.config.object_key();
            let url = ctx
                .signer
                .presigned_get_url(
                    &ctx.config.params.bucket,
                    &key,
                    Duration::from_secs(ctx.config.link.expires_in_secs),
                )
                .await?;
            info!(bucket = %ctx.config.params.bucket, key = %key, "Link signed");
            run_state.signed_url = Some(url);
        }
        StepAction::Notify => {
            let url = run_state
                .signed_url
                .as_deref()
                .ok_or_else(|| DomainError::MissingSignedLink(step.name.clone()))?;
            let message = ctx
                .renderer
                .render_str(&ctx.config.notify.message, &serde_json::json!({ "url": url }))?;
            ctx.notifier.post(&message).await?;
        }
    }
    Ok(())
}

fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), StagehandError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| StagehandError::InternalError(format!("Serialization: {}", e)))?;
    crate::infrastructure::fs::atomic_write(path, content)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::compiler::jinja::SqlRenderer;
    use crate::infrastructure::error::InfrastructureError;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::{TempDir, tempdir};

    // --- FAKES ---

    #[derive(Default)]
    struct FakeConnector {
        executed: Mutex<Vec<String>>,
        failures_remaining: Mutex<u32>,
    }

    impl FakeConnector {
        fn failing_first(n: u32) -> Self {
            Self {
                executed: Mutex::new(vec![]),
                failures_remaining: Mutex::new(n),
            }
        }
    }

    #[async_trait]
    impl WarehouseConnector for FakeConnector {
        async fn execute(&self, statement: &str) -> Result<(), StagehandError> {
            let mut remaining = self.failures_remaining.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StagehandError::Infrastructure(
                    InfrastructureError::WarehouseError {
                        status: 503,
                        body: "warehouse unavailable".to_string(),
                    },
                ));
            }
            self.executed.lock().unwrap().push(statement.to_string());
            Ok(())
        }

        fn engine_name(&self) -> &str {
            "fake"
        }
    }

    #[derive(Default)]
    struct FakeSigner {
        calls: Mutex<Vec<(String, String, u64)>>,
        url: String,
    }

    impl FakeSigner {
        fn with_url(url: &str) -> Self {
            Self {
                calls: Mutex::new(vec![]),
                url: url.to_string(),
            }
        }
    }

    #[async_trait]
    impl LinkSigner for FakeSigner {
        async fn presigned_get_url(
            &self,
            bucket: &str,
            key: &str,
            expires_in: Duration,
        ) -> Result<String, StagehandError> {
            self.calls.lock().unwrap().push((
                bucket.to_string(),
                key.to_string(),
                expires_in.as_secs(),
            ));
            Ok(self.url.clone())
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        async fn post(&self, text: &str) -> Result<(), StagehandError> {
            self.messages.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    // --- FIXTURE ---

    const FLOW_YAML: &str = r#"
name: account_monthly_balance_generation
owner: data-finance

connections:
  warehouse: snowflake_conn_id
  object-store: aws_conn_id
  webhook: slack_webhook_conn

queries-dir: queries
files-dir: target

params:
  db: ANALYTICS
  schema_origin: RAW
  schema_destination: SILVER
  stage: "@ANALYTICS.RAW.EXPORT_STAGE"
  path: output_files
  bucket: exports-bucket
  filename: balance.csv

link:
  expires-in-secs: 604800

notify:
  message: "✅ CSV file for monthly account balance is available at:\n{{ url }}"

retry:
  max-attempts: 3
  delay-secs: 0

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

    struct Fixture {
        _tmp: TempDir,
        flow_dir: PathBuf,
        config: FlowConfig,
        renderer: SqlRenderer,
    }

    fn fixture() -> Result<Fixture> {
        let tmp = tempdir()?;
        let flow_dir = tmp.path().to_path_buf();
        let queries = flow_dir.join("queries");
        fs::create_dir(&queries)?;
        fs::write(
            queries.join("create_table.sql"),
            "CREATE TABLE IF NOT EXISTS {{ params.db }}.{{ params.schema_destination }}.BALANCE (ID NUMBER);",
        )?;
        fs::write(
            queries.join("load_to_s3.sql"),
            "COPY INTO {{ params.db }}.{{ params.schema_destination }}.BALANCE FROM '{{ params.stage }}/{{ params.path }}/{{ params.filename }}';",
        )?;

        let config: FlowConfig = serde_yaml::from_str(FLOW_YAML)?;
        let renderer = SqlRenderer::from_dir(&queries);
        Ok(Fixture {
            _tmp: tmp,
            flow_dir,
            config,
            renderer,
        })
    }

    const SIGNED_URL: &str = "https://exports-bucket.s3.us-east-1.amazonaws.com/output_files/balance.csv?X-Amz-Expires=604800&X-Amz-Signature=deadbeef";

    // --- TESTS ---

    #[tokio::test]
    async fn test_run_executes_steps_in_order_and_notifies_verbatim() -> Result<()> {
        let fx = fixture()?;
        let connector = FakeConnector::default();
        let signer = FakeSigner::with_url(SIGNED_URL);
        let notifier = FakeNotifier::default();

        let report = run_flow(
            &fx.config,
            &fx.flow_dir,
            &fx.renderer,
            &connector,
            &signer,
            &notifier,
        )
        .await?;

        assert!(report.success);
        assert_eq!(report.steps.len(), 4);
        assert!(report.steps.iter().all(|s| s.status == StepStatus::Succeeded));
        assert!(report.steps.iter().all(|s| s.attempts == 1));

        // Warehouse saw the two rendered statements, in dependency order
        let executed = connector.executed.lock().unwrap();
        assert_eq!(executed.len(), 2);
        assert_eq!(
            executed[0],
            "CREATE TABLE IF NOT EXISTS ANALYTICS.SILVER.BALANCE (ID NUMBER);"
        );
        assert!(executed[1].starts_with("COPY INTO ANALYTICS.SILVER.BALANCE"));

        // One signature, for the configured object and the full 7 days
        let calls = signer.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![(
                "exports-bucket".to_string(),
                "output_files/balance.csv".to_string(),
                604_800
            )]
        );

        // The message is the fixed prefix plus the URL, untouched
        let messages = notifier.messages.lock().unwrap();
        assert_eq!(
            *messages,
            vec![format!(
                "✅ CSV file for monthly account balance is available at:\n{SIGNED_URL}"
            )]
        );

        // Compiled SQL and the run report landed under files-dir
        assert!(fx.flow_dir.join("target/compiled/create_table.sql").exists());
        let saved: RunReport =
            serde_json::from_str(&fs::read_to_string(fx.flow_dir.join("target/run_results.json"))?)?;
        assert!(saved.success);
        Ok(())
    }

    #[tokio::test]
    async fn test_failure_halts_the_run_and_skips_downstream() -> Result<()> {
        let fx = fixture()?;
        // Never recovers: the first step burns its whole retry budget
        let connector = FakeConnector::failing_first(u32::MAX);
        let signer = FakeSigner::with_url(SIGNED_URL);
        let notifier = FakeNotifier::default();

        let report = run_flow(
            &fx.config,
            &fx.flow_dir,
            &fx.renderer,
            &connector,
            &signer,
            &notifier,
        )
        .await?;

        assert!(!report.success);
        assert_eq!(report.steps[0].status, StepStatus::Failed);
        assert_eq!(report.steps[0].attempts, 3);
        for skipped in &report.steps[1..] {
            assert_eq!(skipped.status, StepStatus::Skipped);
        }

        // Nothing downstream ever ran
        assert!(signer.calls.lock().unwrap().is_empty());
        assert!(notifier.messages.lock().unwrap().is_empty());

        // The report still landed
        let saved: RunReport =
            serde_json::from_str(&fs::read_to_string(fx.flow_dir.join("target/run_results.json"))?)?;
        assert!(!saved.success);
        Ok(())
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried_within_budget() -> Result<()> {
        let fx = fixture()?;
        // Two failures, then healthy again: fits inside max-attempts 3
        let connector = FakeConnector::failing_first(2);
        let signer = FakeSigner::with_url(SIGNED_URL);
        let notifier = FakeNotifier::default();

        let report = run_flow(
            &fx.config,
            &fx.flow_dir,
            &fx.renderer,
            &connector,
            &signer,
            &notifier,
        )
        .await?;

        assert!(report.success);
        assert_eq!(report.steps[0].attempts, 3);
        assert_eq!(report.steps[1].attempts, 1);
        assert_eq!(notifier.messages.lock().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_rerun_notifies_again() -> Result<()> {
        // The notifier has no memory: a second successful run posts a second message.
        let fx = fixture()?;
        let connector = FakeConnector::default();
        let signer = FakeSigner::with_url(SIGNED_URL);
        let notifier = FakeNotifier::default();

        for _ in 0..2 {
            let report = run_flow(
                &fx.config,
                &fx.flow_dir,
                &fx.renderer,
                &connector,
                &signer,
                &notifier,
            )
            .await?;
            assert!(report.success);
        }

        assert_eq!(notifier.messages.lock().unwrap().len(), 2);
        assert_eq!(connector.executed.lock().unwrap().len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_strict_lint_blocks_garbage_before_the_warehouse() -> Result<()> {
        let fx = fixture()?;
        fs::write(
            fx.flow_dir.join("queries/create_table.sql"),
            "CREATE TABL broken (",
        )?;
        let mut config = fx.config.clone();
        config.lint = LintMode::Strict;

        let connector = FakeConnector::default();
        let signer = FakeSigner::with_url(SIGNED_URL);
        let notifier = FakeNotifier::default();

        let report = run_flow(
            &config,
            &fx.flow_dir,
            &fx.renderer,
            &connector,
            &signer,
            &notifier,
        )
        .await?;

        assert!(!report.success);
        assert_eq!(report.steps[0].status, StepStatus::Failed);
        assert!(connector.executed.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_warn_lint_lets_the_warehouse_decide() -> Result<()> {
        let fx = fixture()?;
        fs::write(
            fx.flow_dir.join("queries/create_table.sql"),
            "CREATE TABL broken (",
        )?;

        let connector = FakeConnector::default();
        let signer = FakeSigner::with_url(SIGNED_URL);
        let notifier = FakeNotifier::default();

        let report = run_flow(
            &fx.config,
            &fx.flow_dir,
            &fx.renderer,
            &connector,
            &signer,
            &notifier,
        )
        .await?;

        // Default mode is warn: the statement went through untouched
        assert!(report.success);
        assert_eq!(connector.executed.lock().unwrap()[0], "CREATE TABL broken (");
        Ok(())
    }
}
