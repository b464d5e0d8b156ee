//! # Event Hubs OAuth Library
//!
//! Lets a Kafka client authenticate against an Azure Event Hubs namespace
//! with short-lived Entra ID bearer tokens from the Azure credential chain
//! instead of connection-string secrets.
//!
//! Modules:
//! - `config` — namespace resolution and optional YAML configuration
//! - `credentials` — token source seam and the Azure credential chain
//! - `provider` — the OAUTHBEARER token provider, SASL options, token outcomes
//! - `kafka` — client properties and the optional rdkafka context
//!
//! ```rust,ignore
//! let provider = EventHubsTokenProvider::new(ProviderOptions::new().with_namespace("my-namespace"))?;
//! assert_eq!(provider.brokers(), vec!["my-namespace.servicebus.windows.net:9093"]);
//! let token = provider.get_bearer_token().await?;
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod helpers;
pub mod kafka;
pub mod provider;
pub mod tests;
pub mod utils;


pub use crate::error::ProviderError;
pub use crate::provider::{
    BearerToken, EventHubsTokenProvider, ProviderOptions, SaslMechanism, SaslOptions, TokenOutcome,
};
