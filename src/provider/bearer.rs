use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::config::namespace::{resolve_namespace, Namespace};
use crate::credentials::{AzureCredentialChain, TokenSource};
use crate::error::ProviderError;
use crate::helpers::jwt::decode_claims;
use crate::provider::sasl::{SaslMechanism, SaslOptions};
use crate::provider::token::{BearerToken, TokenOutcome};

/// Receives token-exchange errors instead of the caller.
pub type ErrorHandler = Arc<dyn Fn(&ProviderError) + Send + Sync>;

/// Construction options for [`EventHubsTokenProvider`].
#[derive(Clone, Default)]
pub struct ProviderOptions {
    pub namespace: Option<String>,
    pub error_handler: Option<ErrorHandler>,
}

impl ProviderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ProviderError) + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for ProviderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderOptions")
            .field("namespace", &self.namespace)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

/// OAUTHBEARER token provider for Kafka clients of an Event Hubs namespace.
///
/// Cheap to clone; clones share the namespace and credential.
///
/// ```rust,ignore
/// let provider = EventHubsTokenProvider::new(ProviderOptions::new())?;
/// let brokers = provider.brokers();
/// let sasl = provider.sasl_options();
/// let outcome = sasl.bearer_token().await?;
/// ```
#[derive(Clone)]
pub struct EventHubsTokenProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    namespace: Namespace,
    scope: String,
    credential: Arc<dyn TokenSource>,
    error_handler: Option<ErrorHandler>,
}

impl EventHubsTokenProvider {
    /// Resolve the namespace and set up the Azure default credential chain.
    ///
    /// No token is requested here.
    pub fn new(options: ProviderOptions) -> Result<Self, ProviderError> {
        // resolve first so a missing namespace wins over credential setup errors
        let namespace = resolve_namespace(options.namespace.as_deref())?;
        let credential =
            AzureCredentialChain::from_environment().map_err(ProviderError::CredentialSetup)?;
        Ok(Self::from_parts(namespace, Arc::new(credential), options.error_handler))
    }

    /// Same as [`EventHubsTokenProvider::new`] with a caller-supplied credential.
    pub fn with_credential(
        options: ProviderOptions,
        credential: Arc<dyn TokenSource>,
    ) -> Result<Self, ProviderError> {
        let namespace = resolve_namespace(options.namespace.as_deref())?;
        Ok(Self::from_parts(namespace, credential, options.error_handler))
    }

    fn from_parts(
        namespace: Namespace,
        credential: Arc<dyn TokenSource>,
        error_handler: Option<ErrorHandler>,
    ) -> Self {
        let scope = namespace.token_scope();
        debug!(
            namespace = %namespace,
            origin = ?namespace.origin(),
            credential = credential.name(),
            scope = %scope,
            "event hubs token provider created"
        );
        Self {
            inner: Arc::new(ProviderInner {
                namespace,
                scope,
                credential,
                error_handler,
            }),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.inner.namespace
    }

    pub fn token_scope(&self) -> &str {
        &self.inner.scope
    }

    /// Kafka bootstrap brokers, always exactly one.
    pub fn brokers(&self) -> Vec<String> {
        vec![self.inner.namespace.broker_address()]
    }

    pub fn sasl_options(&self) -> SaslOptions {
        let provider = self.clone();
        SaslOptions {
            mechanism: SaslMechanism::OAuthBearer,
            oauth_bearer_provider: Arc::new(move || {
                let provider = provider.clone();
                async move { provider.get_bearer_token().await }.boxed()
            }),
        }
    }

    /// Request a fresh bearer token for the namespace scope.
    ///
    /// On failure the error goes to the error handler when one is configured
    /// and `Ok(TokenOutcome::Handled)` is returned, otherwise it is returned
    /// as `Err`.
    pub async fn get_bearer_token(&self) -> Result<TokenOutcome, ProviderError> {
        let inner = &self.inner;
        match inner.credential.get_token(&inner.scope).await {
            Ok(access_token) => {
                let expires_at = access_token
                    .expires_at
                    .or_else(|| decode_claims(&access_token.token).ok()?.expires_at());
                info!(
                    namespace = %inner.namespace,
                    expires_at = ?expires_at,
                    "bearer token issued"
                );
                Ok(TokenOutcome::Issued(
                    BearerToken::new(access_token.token).with_expiry(expires_at),
                ))
            }
            Err(source) => {
                let err = ProviderError::TokenExchange {
                    scope: inner.scope.clone(),
                    source,
                };
                match &inner.error_handler {
                    Some(handler) => {
                        warn!(namespace = %inner.namespace, error = %err, "token request failed, passing error to handler");
                        handler(&err);
                        Ok(TokenOutcome::Handled)
                    }
                    None => Err(err),
                }
            }
        }
    }
}

impl fmt::Debug for EventHubsTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHubsTokenProvider")
            .field("namespace", &self.inner.namespace)
            .field("scope", &self.inner.scope)
            .field("credential", &self.inner.credential.name())
            .field("error_handler", &self.inner.error_handler.is_some())
            .finish()
    }
}
