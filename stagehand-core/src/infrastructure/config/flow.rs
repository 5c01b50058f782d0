// stagehand-core/src/infrastructure/config/flow.rs

use crate::domain::flow::FlowConfig;
use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

// --- LOADER ---

#[instrument(skip(flow_dir))] // Log automatique de l'entrée/sortie de la fonction
pub fn load_flow_config(flow_dir: &Path) -> Result<FlowConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(flow_dir)?;
    info!(path = ?config_path, "Loading flow definition");

    // 2. Chargement YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: FlowConfig = serde_yaml::from_str(&content)?;

    // 3. Override via Variables d'Environnement (Pattern 'Layering')
    // Permet de faire: STAGEHAND_FILES_DIR=/tmp/build stagehand run
    apply_env_overrides(&mut config);

    // 4. Validation structurelle, avant que quiconque touche au warehouse
    config.validate().map_err(|e| {
        InfrastructureError::ConfigError(format!("Invalid flow configuration: {e}"))
    })?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    let candidates = ["flow.yaml", "stagehand.yaml"];
    for filename in candidates {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No flow file found in {:?}. Checked: {:?}",
        root, candidates
    )))
}

fn apply_env_overrides(config: &mut FlowConfig) {
    // Exemple simple d'override. En prod, on utiliserait la crate 'envy' ou 'figment'.
    if let Ok(val) = std::env::var("STAGEHAND_FILES_DIR") {
        info!(old = ?config.files_dir, new = ?val, "Overriding files dir via ENV");
        config.files_dir = val;
    }
}
