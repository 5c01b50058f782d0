// stagehand/src/commands/run.rs
//
// USE CASE: Run the flow end to end.

use std::path::PathBuf;

use anyhow::Context;
use stagehand_core::StagehandError;
use stagehand_core::application::run_flow;
use stagehand_core::infrastructure::adapters::s3::S3LinkSigner;
use stagehand_core::infrastructure::adapters::slack::SlackWebhookNotifier;
use stagehand_core::infrastructure::adapters::snowflake::SnowflakeSqlApi;
use stagehand_core::infrastructure::compiler::discovery::TemplateDiscovery;
use stagehand_core::infrastructure::compiler::jinja::SqlRenderer;
use stagehand_core::infrastructure::config::connection::YamlCredentials;
use stagehand_core::infrastructure::config::flow::load_flow_config;
use stagehand_core::ports::connector::WarehouseConnector;
use stagehand_core::ports::credentials::CredentialProvider;
use tracing::info;

pub async fn execute(flow_dir: PathBuf) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading flow...");
    let config = load_flow_config(&flow_dir)
        .with_context(|| format!("Failed to load flow definition from {:?}", flow_dir))?;
    println!(
        "   Flow: {} (owner: {})",
        config.name,
        config.owner.as_deref().unwrap_or("n/a")
    );

    // B. Pre-flight: every SQL step must point at a template that exists
    let queries_dir = config.queries_dir_path(&flow_dir);
    TemplateDiscovery::verify(&config, &queries_dir).context("Template pre-flight check failed")?;

    // C. Resolve credentials and build the concrete adapters
    let credentials = YamlCredentials::load(&flow_dir, &config)
        .context("Failed to load the connections registry")?;

    let warehouse = credentials
        .resolve(&config.connections.warehouse)?
        .warehouse(&config.connections.warehouse)?;
    let object_store = credentials
        .resolve(&config.connections.object_store)?
        .object_store(&config.connections.object_store)?;
    let webhook = credentials
        .resolve(&config.connections.webhook)?
        .webhook(&config.connections.webhook)?;

    let connector = SnowflakeSqlApi::new(warehouse);
    println!("   Engine: {} ❄️", connector.engine_name());
    let signer = S3LinkSigner::new(object_store);
    let notifier = SlackWebhookNotifier::new(webhook, config.notify.username.clone());

    // D. Template engine over the queries directory
    let renderer = SqlRenderer::from_dir(&queries_dir);
    info!(flow = %config.name, queries = ?queries_dir, "Adapters ready");

    // E. Run (Application Layer)
    let result = run_flow(&config, &flow_dir, &renderer, &connector, &signer, &notifier).await;

    match result {
        Ok(report) => {
            if report.success {
                println!("\n✨ SUCCESS! Flow finished in {:.2?}", start.elapsed());
            } else {
                let culprit = report
                    .failed_step()
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                eprintln!("\n❌ FAILURE. Step '{}' exhausted its retry budget.", culprit);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL FLOW ERROR");
            report_failure(e);
            std::process::exit(1);
        }
    }

    Ok(())
}

// Domain and infrastructure errors carry miette diagnostics (code + help);
// render those in full instead of a one-line Display.
fn report_failure(error: StagehandError) {
    match error {
        StagehandError::Domain(e) => eprintln!("{:?}", miette::Report::new(e)),
        StagehandError::Infrastructure(e) => eprintln!("{:?}", miette::Report::new(e)),
        other => eprintln!("   ➜ {}", other),
    }
}
