//! Firebase ID-token verification.
//!
//! Production tokens are RS256 JWTs signed by Google; the signing keys are
//! fetched from the securetoken JWKS endpoint and cached per `kid`, with a
//! refetch when an unknown `kid` shows up (key rotation). When the Auth
//! emulator is configured, tokens are unsigned and only the payload claims
//! are checked, matching the admin SDK's emulator behavior.

use std::collections::HashMap;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::warn;

const JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("signing key fetch failed: {0}")]
    KeyFetch(String),
}

/// The verified identity attached to a request.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    aud: String,
    iss: String,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

pub struct FirebaseTokenVerifier {
    project_id: String,
    emulator: bool,
    http: reqwest::Client,
    keys: RwLock<HashMap<String, DecodingKey>>,
}

impl FirebaseTokenVerifier {
    pub fn new(cfg: &configs::FirebaseConfig) -> Self {
        Self {
            project_id: cfg.project_id.clone(),
            emulator: cfg.emulator_host.is_some(),
            http: reqwest::Client::new(),
            keys: RwLock::new(HashMap::new()),
        }
    }

    fn expected_issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }

    pub async fn verify(&self, token: &str) -> Result<DecodedToken, AuthError> {
        let claims = if self.emulator {
            self.decode_unsigned(token)?
        } else {
            self.decode_signed(token).await?
        };
        if claims.sub.trim().is_empty() {
            return Err(AuthError::Invalid("token has no subject".into()));
        }
        Ok(DecodedToken { uid: claims.sub, email: claims.email })
    }

    async fn decode_signed(&self, token: &str) -> Result<FirebaseClaims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::Invalid(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::Invalid("token header missing kid".into()))?;

        let key = match self.cached_key(&kid).await {
            Some(k) => k,
            None => {
                self.refresh_keys().await?;
                self.cached_key(&kid)
                    .await
                    .ok_or_else(|| AuthError::Invalid(format!("unknown signing key {kid}")))?
            }
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.set_issuer(&[self.expected_issuer()]);
        let data = decode::<FirebaseClaims>(token, &key, &validation)
            .map_err(|e| AuthError::Invalid(e.to_string()))?;
        Ok(data.claims)
    }

    /// Emulator tokens carry `alg: none` and an empty signature segment, so
    /// the payload is decoded directly with the same aud/iss/exp checks.
    fn decode_unsigned(&self, token: &str) -> Result<FirebaseClaims, AuthError> {
        let mut parts = token.split('.');
        let payload = match (parts.next(), parts.next()) {
            (Some(_), Some(p)) if !p.is_empty() => p,
            _ => return Err(AuthError::Invalid("malformed token".into())),
        };
        let raw = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| AuthError::Invalid(e.to_string()))?;
        let claims: FirebaseClaims =
            serde_json::from_slice(&raw).map_err(|e| AuthError::Invalid(e.to_string()))?;
        if claims.aud != self.project_id {
            return Err(AuthError::Invalid("audience mismatch".into()));
        }
        if claims.iss != self.expected_issuer() {
            return Err(AuthError::Invalid("issuer mismatch".into()));
        }
        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Invalid("token expired".into()));
        }
        Ok(claims)
    }

    async fn cached_key(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.read().await.get(kid).cloned()
    }

    async fn refresh_keys(&self) -> Result<(), AuthError> {
        let resp = self
            .http
            .get(JWKS_URL)
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;
        let set: JwkSet = resp.json().await.map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        let mut fresh = HashMap::new();
        for jwk in set.keys {
            match DecodingKey::from_rsa_components(&jwk.n, &jwk.e) {
                Ok(key) => {
                    fresh.insert(jwk.kid, key);
                }
                Err(e) => warn!(kid = %jwk.kid, err = %e, "skipping unusable signing key"),
            }
        }
        if fresh.is_empty() {
            return Err(AuthError::KeyFetch("no usable signing keys in JWKS".into()));
        }
        *self.keys.write().await = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verifier(project_id: &str, emulator: bool) -> FirebaseTokenVerifier {
        FirebaseTokenVerifier::new(&configs::FirebaseConfig {
            project_id: project_id.into(),
            emulator_host: emulator.then(|| "localhost:9099".into()),
        })
    }

    fn unsigned_token(aud: &str, iss: &str, sub: &str, exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&json!({
                "sub": sub,
                "aud": aud,
                "iss": iss,
                "exp": exp,
                "email": "student@example.com",
            }))
            .expect("serialize claims"),
        );
        format!("{header}.{payload}.")
    }

    #[tokio::test]
    async fn emulator_token_round_trips() {
        let v = verifier("demo-educonnect", true);
        let exp = Utc::now().timestamp() + 3600;
        let token = unsigned_token(
            "demo-educonnect",
            "https://securetoken.google.com/demo-educonnect",
            "uid-123",
            exp,
        );
        let decoded = v.verify(&token).await.expect("verify");
        assert_eq!(decoded.uid, "uid-123");
        assert_eq!(decoded.email.as_deref(), Some("student@example.com"));
    }

    #[tokio::test]
    async fn emulator_token_audience_is_checked() {
        let v = verifier("demo-educonnect", true);
        let exp = Utc::now().timestamp() + 3600;
        let token = unsigned_token(
            "other-project",
            "https://securetoken.google.com/other-project",
            "uid-123",
            exp,
        );
        assert!(matches!(v.verify(&token).await, Err(AuthError::Invalid(_))));
    }

    #[tokio::test]
    async fn emulator_token_expiry_is_checked() {
        let v = verifier("demo-educonnect", true);
        let exp = Utc::now().timestamp() - 10;
        let token = unsigned_token(
            "demo-educonnect",
            "https://securetoken.google.com/demo-educonnect",
            "uid-123",
            exp,
        );
        assert!(matches!(v.verify(&token).await, Err(AuthError::Invalid(_))));
    }

    #[tokio::test]
    async fn garbage_is_rejected_without_network() {
        let v = verifier("demo-educonnect", true);
        assert!(v.verify("not-a-token").await.is_err());
        assert!(v.verify("").await.is_err());
    }

    #[tokio::test]
    async fn unsigned_token_fails_in_production_mode() {
        let v = verifier("demo-educonnect", false);
        let exp = Utc::now().timestamp() + 3600;
        let token = unsigned_token(
            "demo-educonnect",
            "https://securetoken.google.com/demo-educonnect",
            "uid-123",
            exp,
        );
        // alg "none" never parses as a supported algorithm, so this fails
        // before any key fetch.
        assert!(v.verify(&token).await.is_err());
    }
}
