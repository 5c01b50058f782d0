// stagehand-core/src/infrastructure/adapters/slack.rs

use async_trait::async_trait;
use tracing::debug;

// Imports Hexagonaux
use crate::error::StagehandError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::credentials::WebhookCredentials;
use crate::ports::notifier::Notifier;

/// Posts messages to a Slack incoming webhook.
///
/// The payload is the minimal `{"text": ...}` contract, plus an optional
/// bot username. Slack answers a plain "ok" on success.
pub struct SlackWebhookNotifier {
    client: reqwest::Client,
    webhook_url: String,
    username: Option<String>,
}

impl SlackWebhookNotifier {
    pub fn new(creds: WebhookCredentials, username: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: creds.url,
            username,
        }
    }
}

#[async_trait]
impl Notifier for SlackWebhookNotifier {
    async fn post(&self, text: &str) -> Result<(), StagehandError> {
        let mut payload = serde_json::json!({ "text": text });
        if let Some(username) = &self.username {
            payload["username"] = serde_json::Value::String(username.clone());
        }

        let response = self
            .client
            .post(&self.webhook_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=utf-8")
            .body(payload.to_string())
            .send()
            .await
            .map_err(InfrastructureError::HttpError)?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, "Webhook accepted message");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(InfrastructureError::WebhookError {
                status: status.as_u16(),
                body,
            }
            .into())
        }
    }
}
