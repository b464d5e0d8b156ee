use anyhow::{anyhow, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::helpers::time::from_unix;

/// Claims of an Entra ID access token that are useful for troubleshooting.
///
/// Decoded without signature verification, never use them for authorization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(from_unix)
    }
}

pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(anyhow!("invalid JWT format"));
    }

    // tolerate padded segments from non-conforming issuers
    let payload = parts[1].trim_end_matches('=');
    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| anyhow!("base64 decode error: {}", e))?;

    serde_json::from_slice::<TokenClaims>(&decoded)
        .map_err(|e| anyhow!("invalid JWT payload: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_jwt(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload);
        format!("{}.{}.", header, payload)
    }

    #[test]
    fn decodes_entra_claims() {
        let jwt = sample_jwt(
            r#"{"aud":"https://eventhubs.azure.net","tid":"t-1","oid":"o-1","exp":1700000000,"roles":["x"]}"#,
        );
        let claims = decode_claims(&jwt).unwrap();
        assert_eq!(claims.aud.as_deref(), Some("https://eventhubs.azure.net"));
        assert_eq!(claims.tid.as_deref(), Some("t-1"));
        assert_eq!(claims.appid, None);
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn rejects_opaque_tokens() {
        assert!(decode_claims("dummy-token").is_err());
        assert!(decode_claims("a.!!!.c").is_err());
    }
}
