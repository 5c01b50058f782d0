// stagehand/src/commands/mod.rs

pub mod plan;
pub mod render;
pub mod run;
