// stagehand/src/commands/render.rs
//
// USE CASE: Compile the SQL templates locally, without touching the warehouse.

use std::path::PathBuf;

use anyhow::bail;
use stagehand_core::application::ports::TemplateEngine;
use stagehand_core::domain::flow::StepAction;
use stagehand_core::infrastructure::compiler::discovery::TemplateDiscovery;
use stagehand_core::infrastructure::compiler::jinja::SqlRenderer;
use stagehand_core::infrastructure::config::flow::load_flow_config;

pub fn execute(flow_dir: PathBuf, only: Option<String>) -> anyhow::Result<()> {
    println!("📜 Rendering SQL templates...");

    let config = load_flow_config(&flow_dir)?;
    let queries_dir = config.queries_dir_path(&flow_dir);
    TemplateDiscovery::verify(&config, &queries_dir)?;

    let renderer = SqlRenderer::from_dir(&queries_dir);
    let context = config.template_context();

    let mut rendered = 0usize;
    for step in &config.steps {
        let StepAction::WarehouseSql { template } = &step.action else {
            continue;
        };
        if let Some(wanted) = &only
            && wanted != &step.name
        {
            continue;
        }

        let sql = renderer.render_template(template, &context)?;
        println!("\n-- step: {} ({})", step.name, template);
        println!("{sql}");
        rendered += 1;
    }

    if rendered == 0 {
        match only {
            Some(name) => bail!("No warehouse_sql step named '{}' in this flow", name),
            None => bail!("This flow has no warehouse_sql steps to render"),
        }
    }

    println!("\n✨ Rendered {} statement(s).", rendered);
    Ok(())
}
