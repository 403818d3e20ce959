use core_config::{ConfigError, FromEnv, env_parse, env_required};
use std::time::Duration;

const MIN_SECRET_LEN: usize = 32;

/// Token signing settings.
///
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_EXPIRATION_SECS` (default 7200)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET".to_string(),
                reason: format!(
                    "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            expiration: Duration::from_secs(2 * 60 * 60),
        })
    }

    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self::new(env_required("JWT_SECRET")?)?;
        let secs = env_parse("JWT_EXPIRATION_SECS", config.expiration.as_secs())?;
        Ok(config.with_expiration(Duration::from_secs(secs)))
    }
}
