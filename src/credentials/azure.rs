use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use tracing::debug;

use super::{AccessToken, TokenSource};
use crate::helpers::time::from_unix;

/// The Azure SDK default credential chain.
///
/// Tries environment service principal, workload identity, managed identity
/// and developer CLI logins in order. Building it does no network I/O; the
/// SDK caches and refreshes tokens per scope on its own.
#[derive(Clone)]
pub struct AzureCredentialChain {
    inner: Arc<dyn TokenCredential>,
}

impl AzureCredentialChain {
    pub fn from_environment() -> Result<Self> {
        let inner = azure_identity::create_default_credential()?;
        Ok(Self { inner })
    }

    /// Wrap an already built Azure credential, e.g. a `ClientSecretCredential`.
    pub fn from_credential(inner: Arc<dyn TokenCredential>) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for AzureCredentialChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AzureCredentialChain")
    }
}

#[async_trait]
impl TokenSource for AzureCredentialChain {
    async fn get_token(&self, scope: &str) -> Result<AccessToken> {
        debug!(scope, "requesting token from azure credential chain");
        let response = self.inner.get_token(&[scope]).await?;

        Ok(AccessToken::new(
            response.token.secret(),
            from_unix(response.expires_on.unix_timestamp()),
        ))
    }

    fn name(&self) -> &str {
        "azure-default-credential"
    }
}
