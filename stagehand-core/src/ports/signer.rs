// stagehand-core/src/ports/signer.rs

use crate::error::StagehandError;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait LinkSigner: Send + Sync {
    /// Mints a pre-signed GET URL for one object, valid for `expires_in`
    /// counted from the moment of signing. The URL is opaque: callers pass
    /// it along verbatim and never parse it.
    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StagehandError>;
}
