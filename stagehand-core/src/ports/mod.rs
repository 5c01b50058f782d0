pub mod connector;
pub mod credentials;
pub mod notifier;
pub mod signer;

pub use connector::WarehouseConnector;
pub use credentials::{
    CredentialProvider, ObjectStoreCredentials, ResolvedConnection, WarehouseCredentials,
    WebhookCredentials,
};
pub use notifier::Notifier;
pub use signer::LinkSigner;
