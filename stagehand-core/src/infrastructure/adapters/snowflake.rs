// stagehand-core/src/infrastructure/adapters/snowflake.rs

use async_trait::async_trait;
use tracing::debug;

// Imports Hexagonaux
use crate::error::StagehandError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::WarehouseConnector;
use crate::ports::credentials::WarehouseCredentials;

/// Talks to Snowflake over its SQL REST API (`POST /api/v2/statements`).
///
/// No driver, no session pool: each statement is one authenticated HTTP
/// call, which is all a DDL-and-COPY flow ever needs.
pub struct SnowflakeSqlApi {
    client: reqwest::Client,
    creds: WarehouseCredentials,
    base_url: String,
}

impl SnowflakeSqlApi {
    pub fn new(creds: WarehouseCredentials) -> Self {
        let base_url = match &creds.host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.snowflakecomputing.com", creds.account),
        };

        Self {
            client: reqwest::Client::new(),
            creds,
            base_url,
        }
    }

    fn statements_endpoint(&self) -> Result<String, StagehandError> {
        let endpoint = format!("{}/api/v2/statements", self.base_url);
        // Catch a malformed account/host before reqwest panics on it
        url::Url::parse(&endpoint).map_err(|e| {
            InfrastructureError::ConfigError(format!(
                "Invalid warehouse endpoint '{endpoint}': {e}"
            ))
        })?;
        Ok(endpoint)
    }
}

#[async_trait]
impl WarehouseConnector for SnowflakeSqlApi {
    async fn execute(&self, statement: &str) -> Result<(), StagehandError> {
        let endpoint = self.statements_endpoint()?;

        let mut body = serde_json::json!({ "statement": statement });
        if let Some(role) = &self.creds.role {
            body["role"] = serde_json::Value::String(role.clone());
        }
        if let Some(warehouse) = &self.creds.warehouse {
            body["warehouse"] = serde_json::Value::String(warehouse.clone());
        }

        let response = self
            .client
            .post(&endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", self.creds.token))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, "stagehand")
            .body(body.to_string())
            .send()
            .await
            .map_err(InfrastructureError::HttpError)?;

        let status = response.status();
        if status.is_success() {
            // 200 = done, 202 = still running server-side; both count as accepted
            debug!(status = %status, user = %self.creds.user, "Warehouse accepted statement");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(InfrastructureError::WarehouseError {
                status: status.as_u16(),
                body,
            }
            .into())
        }
    }

    fn engine_name(&self) -> &str {
        "snowflake-sql-api"
    }
}
