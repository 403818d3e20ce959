use super::jwt::{JwtAuth, JwtError};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects the request with 401 unless it carries a valid bearer token.
///
/// On success the decoded [`JwtClaims`](super::JwtClaims) are available to
/// handlers through `Extension<JwtClaims>`.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("Request without bearer token");
        return AppError::Unauthorized("No token provided".to_string()).into_response();
    };

    match auth.verify_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(JwtError::Expired) => {
            AppError::Unauthorized("Token expired".to_string()).into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "JWT verification failed");
            AppError::Unauthorized("Invalid token".to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtClaims, JwtConfig};
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::ServiceExt;

    async fn whoami(Extension(claims): Extension<JwtClaims>) -> String {
        claims.email
    }

    fn app(jwt: JwtAuth) -> Router {
        Router::new()
            .route("/me", get(whoami))
            .route_layer(from_fn_with_state(jwt, jwt_auth_middleware))
    }

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("a-signing-secret-that-is-long-enough!").unwrap())
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let response = app(jwt())
            .oneshot(HttpRequest::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_exposes_claims() {
        let jwt = jwt();
        let token = jwt.create_token("ana@shop.dev").unwrap();

        let response = app(jwt)
            .oneshot(
                HttpRequest::get("/me")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_tampered_token_is_unauthorized() {
        let response = app(jwt())
            .oneshot(
                HttpRequest::get("/me")
                    .header(AUTHORIZATION, "Bearer abc.def.ghi")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
