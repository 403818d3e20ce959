use super::config::JwtConfig;
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token payload. Tokens are keyed on the user's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    Encode(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// HS256 signer and verifier sharing one secret.
#[derive(Clone)]
pub struct JwtAuth {
    keys: Arc<(EncodingKey, DecodingKey)>,
    ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        Self {
            keys: Arc::new((
                EncodingKey::from_secret(secret),
                DecodingKey::from_secret(secret),
            )),
            ttl_secs: config.expiration.as_secs() as i64,
        }
    }

    /// Sign a token for `email`, valid for the configured expiration.
    pub fn create_token(&self, email: &str) -> Result<String, JwtError> {
        let iat = Utc::now().timestamp();
        let claims = JwtClaims {
            email: email.to_string(),
            iat,
            exp: iat + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.0)
            .map_err(|e| JwtError::Encode(e.to_string()))
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<JwtClaims>(token, &self.keys.1, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })
    }
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
