// stagehand-core/src/ports/connector.rs

// This file defines what your application needs, without knowing how it's done.
// Analogy: It's the electrical outlet in the wall. It defines the shape (2 holes) and the voltage (220V), but
// it doesn't know if the electricity comes from nuclear, wind, or coal.

use crate::error::StagehandError;
use async_trait::async_trait;

#[async_trait]
pub trait WarehouseConnector: Send + Sync {
    /// Executes one SQL statement to completion. No rows come back:
    /// the flows only ever issue DDL and COPY statements.
    async fn execute(&self, statement: &str) -> Result<(), StagehandError>;

    /// Short identifier of the engine behind the connection ("snowflake-sql-api", ...).
    fn engine_name(&self) -> &str;
}
