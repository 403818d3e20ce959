use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, FromEnv, env_or_default};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Allowed browser origins, read from `CORS_ALLOWED_ORIGIN` as a
/// comma-separated list. An empty list allows any origin without credentials.
#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl CorsConfig {
    pub fn parse(origins: &str) -> Result<Self, ConfigError> {
        let allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "*")
            .map(|s| {
                s.parse::<HeaderValue>().map_err(|e| ConfigError::ParseError {
                    key: "CORS_ALLOWED_ORIGIN".to_string(),
                    details: format!("{s}: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { allowed_origins })
    }

    pub fn layer(&self) -> CorsLayer {
        let base = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600));

        if self.allowed_origins.is_empty() {
            base.allow_origin(Any)
        } else {
            base.allow_origin(AllowOrigin::list(self.allowed_origins.clone()))
                .allow_credentials(true)
        }
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::parse(&env_or_default("CORS_ALLOWED_ORIGIN", ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated_origins() {
        let config = CorsConfig::parse("http://localhost:3000, https://shop.dev ,").unwrap();
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.allowed_origins[1], "https://shop.dev");
    }

    #[test]
    fn test_wildcard_means_any_origin() {
        assert!(CorsConfig::parse("*").unwrap().allowed_origins.is_empty());
    }

    #[test]
    fn test_from_env_unset_is_permissive() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            assert!(CorsConfig::from_env().unwrap().allowed_origins.is_empty());
        });
    }

    #[test]
    fn test_invalid_origin_is_a_parse_error() {
        let err = CorsConfig::parse("http://bad\norigin").unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }
}
