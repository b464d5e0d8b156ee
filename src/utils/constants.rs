//! Shared constants and invariants

/// Environment variable consulted when no namespace is given explicitly.
pub const NAMESPACE_ENV_VAR: &str = "EVENTHUB_NAMESPACE";

/// Event Hubs namespaces live under this domain.
pub const SERVICEBUS_DOMAIN_SUFFIX: &str = "servicebus.windows.net";

/// Kafka endpoint port of an Event Hubs namespace.
pub const KAFKA_PORT: u16 = 9093;

/// Appended to the namespace resource URI to request all statically granted permissions.
pub const DEFAULT_SCOPE_SUFFIX: &str = "/.default";

// SASL mechanism names
pub const SASL_MECHANISM_OAUTHBEARER: &str = "oauthbearer";
pub const LIBRDKAFKA_MECHANISM_OAUTHBEARER: &str = "OAUTHBEARER";
pub const SECURITY_PROTOCOL_SASL_SSL: &str = "SASL_SSL";

/// Reported to librdkafka when the credential gave no expiry.
pub const FALLBACK_TOKEN_LIFETIME_SECS: i64 = 3600;
