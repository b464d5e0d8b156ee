//! Kafka client wiring for an [`EventHubsTokenProvider`].

use std::collections::BTreeMap;

use crate::provider::{EventHubsTokenProvider, SaslMechanism};
use crate::utils::constants::SECURITY_PROTOCOL_SASL_SSL;

#[cfg(feature = "rdkafka")]
pub mod rdkafka_context;

#[cfg(feature = "rdkafka")]
pub use rdkafka_context::{client_config, EventHubsClientContext};

/// librdkafka-style properties for connecting to the namespace.
///
/// The token itself is supplied at runtime through the OAUTHBEARER callback.
pub fn client_properties(provider: &EventHubsTokenProvider) -> BTreeMap<&'static str, String> {
    let mut props = BTreeMap::new();
    props.insert("bootstrap.servers", provider.brokers().join(","));
    props.insert("security.protocol", SECURITY_PROTOCOL_SASL_SSL.to_owned());
    props.insert(
        "sasl.mechanisms",
        SaslMechanism::OAuthBearer.librdkafka_name().to_owned(),
    );
    props
}
