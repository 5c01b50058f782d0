// stagehand/src/commands/plan.rs
//
// USE CASE: Static validation — print the execution sequence without running it.

use std::path::PathBuf;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use stagehand_core::domain::flow::{FlowPlan, StepAction};
use stagehand_core::infrastructure::compiler::discovery::TemplateDiscovery;
use stagehand_core::infrastructure::config::flow::load_flow_config;

pub fn execute(flow_dir: PathBuf) -> anyhow::Result<()> {
    println!("🗺️  Planning flow...");

    // 1. Load Config (no credentials involved: plan works fully offline)
    let config = load_flow_config(&flow_dir)?;
    println!(
        "   Flow: {} (owner: {})",
        config.name,
        config.owner.as_deref().unwrap_or("n/a")
    );
    if !config.tags.is_empty() {
        println!("   Tags: {}", config.tags.join(", "));
    }

    // 2. Linearize the step graph (rejects cycles, unknown deps, bad ordering)
    let plan = FlowPlan::sequence(&config)?;

    // 3. Every SQL step must point at a template that exists
    let queries_dir = config.queries_dir_path(&flow_dir);
    TemplateDiscovery::verify(&config, &queries_dir)?;

    // 4. Print the sequence
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Step", "Action", "Depends on"]);

    for (position, step) in plan.steps().enumerate() {
        table.add_row(vec![
            (position + 1).to_string(),
            step.name.clone(),
            describe(&step.action),
            step.depends_on.join(", "),
        ]);
    }
    println!("{table}");

    println!("✨ Plan is valid: {} steps, strictly sequential.", plan.len());
    Ok(())
}

fn describe(action: &StepAction) -> String {
    match action {
        StepAction::WarehouseSql { template } => format!("warehouse_sql ({template})"),
        StepAction::PresignGet => "presign_get".to_string(),
        StepAction::Notify => "notify".to_string(),
    }
}
