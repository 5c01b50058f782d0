// stagehand-core/src/ports/credentials.rs

use crate::error::StagehandError;
use crate::infrastructure::error::InfrastructureError;

/// Credentials for the warehouse SQL API.
#[derive(Debug, Clone)]
pub struct WarehouseCredentials {
    pub account: String,
    pub user: String,
    pub token: String,
    pub role: Option<String>,
    pub warehouse: Option<String>,
    /// Full base URL override. When set it wins over the account-derived
    /// host, which is how a local stub gets wired in.
    pub host: Option<String>,
}

/// Credentials for the object-store service (key, secret, region).
#[derive(Debug, Clone)]
pub struct ObjectStoreCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

/// An incoming-webhook endpoint. The URL is the secret.
#[derive(Debug, Clone)]
pub struct WebhookCredentials {
    pub url: String,
}

/// What a connection name resolves to.
#[derive(Debug, Clone)]
pub enum ResolvedConnection {
    Warehouse(WarehouseCredentials),
    ObjectStore(ObjectStoreCredentials),
    Webhook(WebhookCredentials),
}

impl ResolvedConnection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Warehouse(_) => "warehouse",
            Self::ObjectStore(_) => "object-store",
            Self::Webhook(_) => "webhook",
        }
    }

    pub fn warehouse(self, name: &str) -> Result<WarehouseCredentials, StagehandError> {
        match self {
            Self::Warehouse(creds) => Ok(creds),
            other => Err(mismatch(name, "warehouse", other.kind())),
        }
    }

    pub fn object_store(self, name: &str) -> Result<ObjectStoreCredentials, StagehandError> {
        match self {
            Self::ObjectStore(creds) => Ok(creds),
            other => Err(mismatch(name, "object-store", other.kind())),
        }
    }

    pub fn webhook(self, name: &str) -> Result<WebhookCredentials, StagehandError> {
        match self {
            Self::Webhook(creds) => Ok(creds),
            other => Err(mismatch(name, "webhook", other.kind())),
        }
    }
}

fn mismatch(name: &str, expected: &str, found: &str) -> StagehandError {
    InfrastructureError::ConfigError(format!(
        "Connection '{name}' is a {found} profile, expected {expected}"
    ))
    .into()
}

/// Resolves connection names into usable credentials.
///
/// Steps never see where the secrets come from; they ask for a name and
/// get a typed bundle back.
pub trait CredentialProvider: Send + Sync {
    fn resolve(&self, name: &str) -> Result<ResolvedConnection, StagehandError>;
}
