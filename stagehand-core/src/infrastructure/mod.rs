// stagehand-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod compiler;
pub mod config;
pub mod error;
pub mod fs;

// Optional: Re-export specific adapters if you want cleaner imports elsewhere
pub use adapters::{S3LinkSigner, SlackWebhookNotifier, SnowflakeSqlApi};
