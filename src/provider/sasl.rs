use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::ProviderError;
use crate::provider::token::TokenOutcome;
use crate::utils::constants::{LIBRDKAFKA_MECHANISM_OAUTHBEARER, SASL_MECHANISM_OAUTHBEARER};

/// Zero-argument token callback, invoked once per (re-)authentication.
pub type OAuthBearerCallback =
    Arc<dyn Fn() -> BoxFuture<'static, Result<TokenOutcome, ProviderError>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslMechanism {
    OAuthBearer,
}

impl SaslMechanism {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaslMechanism::OAuthBearer => SASL_MECHANISM_OAUTHBEARER,
        }
    }

    /// Name expected by librdkafka's `sasl.mechanisms`.
    pub fn librdkafka_name(&self) -> &'static str {
        match self {
            SaslMechanism::OAuthBearer => LIBRDKAFKA_MECHANISM_OAUTHBEARER,
        }
    }
}

impl fmt::Display for SaslMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SASL settings for a pluggable oauthbearer mechanism.
#[derive(Clone)]
pub struct SaslOptions {
    pub mechanism: SaslMechanism,
    pub oauth_bearer_provider: OAuthBearerCallback,
}

impl SaslOptions {
    /// Invoke the token callback.
    pub async fn bearer_token(&self) -> Result<TokenOutcome, ProviderError> {
        (self.oauth_bearer_provider)().await
    }
}

impl fmt::Debug for SaslOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaslOptions")
            .field("mechanism", &self.mechanism)
            .field("oauth_bearer_provider", &"<callback>")
            .finish()
    }
}
