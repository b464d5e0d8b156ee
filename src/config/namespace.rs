use std::env;
use std::fmt;

use tracing::debug;

use crate::error::ProviderError;
use crate::utils::constants::{
    DEFAULT_SCOPE_SUFFIX, KAFKA_PORT, NAMESPACE_ENV_VAR, SERVICEBUS_DOMAIN_SUFFIX,
};

/// Where a resolved namespace came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceOrigin {
    Explicit,
    Environment,
}

/// Event Hubs namespace, resolved once and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    origin: NamespaceOrigin,
}

impl Namespace {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> NamespaceOrigin {
        self.origin
    }

    /// `{namespace}.servicebus.windows.net`
    pub fn host(&self) -> String {
        format!("{}.{}", self.name, SERVICEBUS_DOMAIN_SUFFIX)
    }

    /// `{namespace}.servicebus.windows.net:9093`
    pub fn broker_address(&self) -> String {
        format!("{}:{}", self.host(), KAFKA_PORT)
    }

    /// Resource scope the bearer token is requested for.
    pub fn token_scope(&self) -> String {
        format!("https://{}{}", self.host(), DEFAULT_SCOPE_SUFFIX)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Resolve the namespace from an explicit value, falling back to `EVENTHUB_NAMESPACE`.
pub fn resolve_namespace(explicit: Option<&str>) -> Result<Namespace, ProviderError> {
    resolve_namespace_with(explicit, |key| env::var(key).ok())
}

/// Same as [`resolve_namespace`] with a caller-supplied environment lookup.
///
/// Precedence: explicit value, then the environment, then
/// [`ProviderError::MissingNamespace`]. Empty strings count as absent.
pub fn resolve_namespace_with<F>(explicit: Option<&str>, lookup: F) -> Result<Namespace, ProviderError>
where
    F: FnOnce(&str) -> Option<String>,
{
    if let Some(name) = non_empty(explicit) {
        debug!(namespace = %name, "namespace taken from explicit option");
        return Ok(Namespace {
            name: name.to_owned(),
            origin: NamespaceOrigin::Explicit,
        });
    }

    let from_env = lookup(NAMESPACE_ENV_VAR);
    if let Some(name) = non_empty(from_env.as_deref()) {
        debug!(namespace = %name, env = NAMESPACE_ENV_VAR, "namespace taken from environment");
        return Ok(Namespace {
            name: name.to_owned(),
            origin: NamespaceOrigin::Environment,
        });
    }

    Err(ProviderError::MissingNamespace {
        env_var: NAMESPACE_ENV_VAR,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
