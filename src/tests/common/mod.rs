// tests/common/mod.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::credentials::{AccessToken, TokenSource};
use crate::provider::{EventHubsTokenProvider, ProviderOptions};

/// What the mock credential answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Token {
        token: String,
        expires_at: Option<DateTime<Utc>>,
    },
    Fail(String),
}

/// Recording stand-in for the Azure credential chain.
#[derive(Debug)]
pub struct MockCredential {
    response: Mutex<MockResponse>,
    scopes: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockCredential {
    pub fn returning(token: &str) -> Arc<Self> {
        Self::with_response(MockResponse::Token {
            token: token.to_owned(),
            expires_at: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::with_response(MockResponse::Fail(message.to_owned()))
    }

    pub fn with_response(response: MockResponse) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(response),
            scopes: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub async fn respond_with(&self, response: MockResponse) {
        *self.response.lock().await = response;
    }

    pub async fn requested_scopes(&self) -> Vec<String> {
        self.scopes.lock().await.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for MockCredential {
    async fn get_token(&self, scope: &str) -> Result<AccessToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scopes.lock().await.push(scope.to_owned());
        match self.response.lock().await.clone() {
            MockResponse::Token { token, expires_at } => Ok(AccessToken::new(token, expires_at)),
            MockResponse::Fail(message) => Err(anyhow!(message)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Provider backed by the mock `credential`.
pub fn provider_with(
    options: ProviderOptions,
    credential: &Arc<MockCredential>,
) -> EventHubsTokenProvider {
    EventHubsTokenProvider::with_credential(options, credential.clone())
        .expect("provider construction")
}

/// Minimal unsigned JWT carrying only an `exp` claim.
pub fn sample_jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
    format!("{}.{}.", header, payload)
}
