// stagehand-core/src/application/mod.rs

pub mod lint;
pub mod ports;
pub mod runner;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use stagehand_core::application::{run_flow, lint_statement};`
// sans avoir à connaître la structure interne des fichiers.

pub use lint::lint_statement;
pub use runner::run_flow;
