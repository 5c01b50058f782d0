// stagehand-core/src/infrastructure/compiler/discovery.rs

use crate::domain::flow::{FlowConfig, StepAction};
use crate::infrastructure::error::InfrastructureError;
use std::path::Path;
use walkdir::WalkDir;

pub struct TemplateDiscovery;

impl TemplateDiscovery {
    /// Lists every `.sql` template under the queries directory, named
    /// relative to it (the same names the renderer's loader resolves).
    pub fn list(queries_dir: &Path) -> Result<Vec<String>, InfrastructureError> {
        let mut names = Vec::new();

        let walker = WalkDir::new(queries_dir).follow_links(true).min_depth(1);
        for entry in walker {
            let entry = entry.map_err(|e| {
                InfrastructureError::ConfigError(format!(
                    "Failed to scan {:?}: {e}",
                    queries_dir
                ))
            })?;

            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "sql") {
                let rel = path.strip_prefix(queries_dir).unwrap_or(path);
                names.push(rel.to_string_lossy().to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Checks that every SQL step of the flow points at a template that
    /// actually exists, before anything touches the warehouse.
    pub fn verify(flow: &FlowConfig, queries_dir: &Path) -> Result<(), InfrastructureError> {
        let known = Self::list(queries_dir)?;

        for step in &flow.steps {
            if let StepAction::WarehouseSql { template } = &step.action
                && !known.iter().any(|k| k == template)
            {
                return Err(InfrastructureError::TemplateNotFound {
                    template: template.clone(),
                    step: step.name.clone(),
                });
            }
        }

        Ok(())
    }
}
