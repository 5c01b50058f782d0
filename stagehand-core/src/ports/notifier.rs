// stagehand-core/src/ports/notifier.rs

use crate::error::StagehandError;
use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Posts one already-rendered message. Delivery is at-least-once from
    /// the flow's point of view: a rerun posts again.
    async fn post(&self, text: &str) -> Result<(), StagehandError>;
}
