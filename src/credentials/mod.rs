//! Credential seam between the provider and the identity platform.
//!
//! [`TokenSource`] is the only thing the provider needs from a credential:
//! hand over a token for one scope. Caching, refresh and retries belong to
//! the implementation behind the trait.

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod azure;

pub use azure::AzureCredentialChain;

/// Token returned by a [`TokenSource`].
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Something that can exchange a resource scope for a bearer token.
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn get_token(&self, scope: &str) -> Result<AccessToken>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
