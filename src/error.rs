use thiserror::Error;

/// Errors surfaced by the token provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No namespace given explicitly and none found in the environment.
    #[error("event hubs namespace is required - provide it as an option or set the environment variable {env_var}")]
    MissingNamespace { env_var: &'static str },

    /// The credential chain could not be built.
    #[error("failed to set up the Azure credential chain: {0}")]
    CredentialSetup(#[source] anyhow::Error),

    /// The credential platform rejected or failed the token request.
    #[error("token request for scope '{scope}' failed: {source}")]
    TokenExchange {
        scope: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ProviderError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ProviderError::MissingNamespace { .. })
    }
}
