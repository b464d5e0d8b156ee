use std::fmt;

use chrono::{DateTime, Utc};

/// Bearer token handed to the SASL OAUTHBEARER mechanism.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Result of a token request that did not propagate an error.
///
/// `Handled` means the exchange failed and the error went to the configured
/// error handler, so no token is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    Issued(BearerToken),
    Handled,
}

impl TokenOutcome {
    pub fn is_issued(&self) -> bool {
        matches!(self, TokenOutcome::Issued(_))
    }

    pub fn token(&self) -> Option<&BearerToken> {
        match self {
            TokenOutcome::Issued(token) => Some(token),
            TokenOutcome::Handled => None,
        }
    }

    pub fn into_token(self) -> Option<BearerToken> {
        match self {
            TokenOutcome::Issued(token) => Some(token),
            TokenOutcome::Handled => None,
        }
    }
}
