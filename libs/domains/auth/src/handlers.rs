//! HTTP handlers for the auth endpoints

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    JwtClaims, ValidatedJson,
    errors::responses::{
        BadRequestConflictResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AuthResult;
use crate::models::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::AuthService;

/// OpenAPI documentation for Auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, check_status),
    components(
        schemas(SignupRequest, LoginRequest, AuthResponse, UserResponse),
        responses(
            BadRequestConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Signup, login and token refresh")
    )
)]
pub struct ApiDoc;

/// Auth router. `check-status` sits behind the bearer-token guard.
pub fn router<R: UserRepository + 'static>(service: AuthService<R>) -> Router {
    let jwt = service.jwt().clone();
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/check-status", get(check_status))
        .route_layer(from_fn_with_state(jwt, jwt_auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
        .with_state(shared_service)
}

/// Create an account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<SignupRequest>,
) -> AuthResult<impl IntoResponse> {
    let response = service.signup(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AuthResult<Json<AuthResponse>> {
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Current user with a refreshed token
#[utoipa::path(
    get,
    path = "/check-status",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid", body = AuthResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn check_status<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    Extension(claims): Extension<JwtClaims>,
) -> AuthResult<Json<AuthResponse>> {
    let response = service.check_status(&claims.email).await?;
    Ok(Json(response))
}
