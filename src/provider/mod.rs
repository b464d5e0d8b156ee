//! The Event Hubs OAUTHBEARER token provider and the shapes it hands to Kafka clients.

pub mod bearer;
pub mod sasl;
pub mod token;

pub use bearer::{ErrorHandler, EventHubsTokenProvider, ProviderOptions};
pub use sasl::{OAuthBearerCallback, SaslMechanism, SaslOptions};
pub use token::{BearerToken, TokenOutcome};
