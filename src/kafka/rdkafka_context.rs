use std::error::Error;

use rdkafka::client::OAuthToken;
use rdkafka::consumer::ConsumerContext;
use rdkafka::{ClientConfig, ClientContext};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::debug;

use super::client_properties;
use crate::helpers::time::now_i64;
use crate::provider::{EventHubsTokenProvider, TokenOutcome};
use crate::utils::constants::FALLBACK_TOKEN_LIFETIME_SECS;

/// rdkafka context that answers OAUTHBEARER refresh callbacks with Event Hubs tokens.
///
/// The callback runs on whichever thread polls the client. On a multi-thread
/// tokio worker (e.g. a `StreamConsumer` polled from a task) the wait moves
/// off the worker with `block_in_place`; on a plain thread the exchange is
/// spawned on the captured runtime. Current-thread runtime workers cannot
/// block and get an error instead.
pub struct EventHubsClientContext {
    provider: EventHubsTokenProvider,
    runtime: Handle,
}

impl EventHubsClientContext {
    /// Must be called from within a tokio runtime.
    pub fn new(provider: EventHubsTokenProvider) -> Self {
        Self::with_runtime(provider, Handle::current())
    }

    pub fn with_runtime(provider: EventHubsTokenProvider, runtime: Handle) -> Self {
        Self { provider, runtime }
    }
}

impl ClientContext for EventHubsClientContext {
    const ENABLE_REFRESH_OAUTH_TOKEN: bool = true;

    fn generate_oauth_token(
        &self,
        _oauthbearer_config: Option<&str>,
    ) -> Result<OAuthToken, Box<dyn Error>> {
        let token = match self.exchange()? {
            TokenOutcome::Issued(token) => token,
            TokenOutcome::Handled => {
                return Err("token request failed, the error was passed to the error handler".into())
            }
        };

        let lifetime_ms = token
            .expires_at
            .map(|at| at.timestamp_millis())
            .unwrap_or_else(|| (now_i64() + FALLBACK_TOKEN_LIFETIME_SECS) * 1000);
        debug!(lifetime_ms, "oauthbearer token refreshed");

        Ok(OAuthToken {
            token: token.value,
            principal_name: String::new(),
            lifetime_ms,
        })
    }
}

impl EventHubsClientContext {
    fn exchange(&self) -> Result<TokenOutcome, Box<dyn Error>> {
        let provider = self.provider.clone();
        match Handle::try_current() {
            Ok(current) => match current.runtime_flavor() {
                RuntimeFlavor::MultiThread => {
                    let outcome = tokio::task::block_in_place(|| {
                        current.block_on(provider.get_bearer_token())
                    })?;
                    Ok(outcome)
                }
                _ => Err("oauthbearer refresh cannot block a current-thread tokio runtime, poll the client from a multi-thread runtime or a plain thread".into()),
            },
            Err(_) => {
                let task = self
                    .runtime
                    .spawn(async move { provider.get_bearer_token().await });
                let outcome = futures::executor::block_on(task)??;
                Ok(outcome)
            }
        }
    }
}

impl ConsumerContext for EventHubsClientContext {}

/// `ClientConfig` pre-filled with the namespace brokers and SASL settings.
pub fn client_config(provider: &EventHubsTokenProvider) -> ClientConfig {
    let mut config = ClientConfig::new();
    for (key, value) in client_properties(provider) {
        config.set(key, value);
    }
    config
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::provider::ProviderOptions;
    use crate::tests::common::{provider_with, MockCredential, MockResponse};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn refresh_callback_returns_token_with_absolute_lifetime() {
        let rt = runtime();
        let credential = MockCredential::with_response(MockResponse::Token {
            token: "dummy-token".into(),
            expires_at: DateTime::from_timestamp(1_900_000_000, 0),
        });
        let provider = provider_with(ProviderOptions::new().with_namespace("my-namespace"), &credential);
        let context = EventHubsClientContext::with_runtime(provider, rt.handle().clone());

        let token = context.generate_oauth_token(None).unwrap();
        assert_eq!(token.token, "dummy-token");
        assert_eq!(token.lifetime_ms, 1_900_000_000_000);
    }

    #[test]
    fn handled_failure_is_reported_to_librdkafka() {
        let rt = runtime();
        let credential = MockCredential::failing("token-error");
        let options = ProviderOptions::new()
            .with_namespace("my-namespace")
            .with_error_handler(|_| {});
        let context =
            EventHubsClientContext::with_runtime(provider_with(options, &credential), rt.handle().clone());

        assert!(context.generate_oauth_token(None).is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn refresh_callback_on_runtime_worker_does_not_panic() {
        let credential = MockCredential::returning("dummy-token");
        let provider = provider_with(ProviderOptions::new().with_namespace("my-namespace"), &credential);
        let context = EventHubsClientContext::new(provider);

        let token = context.generate_oauth_token(None).unwrap();
        assert_eq!(token.token, "dummy-token");
        assert_eq!(credential.calls(), 1);
    }

    #[tokio::test]
    async fn refresh_callback_on_current_thread_runtime_is_an_error() {
        let credential = MockCredential::returning("dummy-token");
        let provider = provider_with(ProviderOptions::new().with_namespace("my-namespace"), &credential);
        let context = EventHubsClientContext::new(provider);

        let err = context.generate_oauth_token(None).unwrap_err();
        assert!(err.to_string().contains("current-thread"), "{err}");
        assert_eq!(credential.calls(), 0);
    }

    #[test]
    fn unknown_expiry_falls_back_to_one_hour() {
        let rt = runtime();
        let credential = MockCredential::returning("opaque-token");
        let provider = provider_with(ProviderOptions::new().with_namespace("my-namespace"), &credential);
        let context = EventHubsClientContext::with_runtime(provider, rt.handle().clone());

        let before = now_i64() * 1000;
        let token = context.generate_oauth_token(None).unwrap();
        let after = now_i64() * 1000;

        let hour_ms = FALLBACK_TOKEN_LIFETIME_SECS * 1000;
        assert!(token.lifetime_ms >= before + hour_ms, "{}", token.lifetime_ms);
        assert!(token.lifetime_ms <= after + hour_ms, "{}", token.lifetime_ms);
    }

    #[test]
    fn client_config_carries_sasl_settings() {
        let credential = MockCredential::returning("unused");
        let provider = provider_with(ProviderOptions::new().with_namespace("my-namespace"), &credential);
        let config = client_config(&provider);
        assert_eq!(config.get("sasl.mechanisms"), Some("OAUTHBEARER"));
        assert_eq!(
            config.get("bootstrap.servers"),
            Some("my-namespace.servicebus.windows.net:9093")
        );
    }
}
