//! Authentication handlers

use auth_service::AuthError;
use axum::{
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use tracing::{info, warn};

use crate::{
    error::ApiError,
    middleware::bearer_token,
    models::{
        CurrentUser, LoginRequest, LoginResponse, LoginUser, MeResponse, MessageResponse,
        ModuleInfo, SignupRequest, SignupResponse, UserView,
    },
    server::AppState,
};

pub async fn module_info() -> Json<ModuleInfo> {
    Json(ModuleInfo {
        message: "Auth module",
        endpoints: &[
            "POST /api/auth/signup",
            "POST /api/auth/login",
            "POST /api/auth/logout",
            "GET /api/auth/me",
        ],
    })
}

/// Register a user and return a token for them
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let Json(request) = payload.map_err(|_| AuthError::MissingFields)?;
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AuthError::MissingFields.into());
    };

    let registration = state
        .auth
        .sign_up(&email, &password, request.display_name)
        .await
        .inspect_err(|e| warn!(%email, error = %e, "Signup rejected"))?;
    info!(uid = %registration.user.uid, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user: UserView {
                uid: registration.user.uid,
                email: registration.user.email,
                display_name: registration.user.display_name,
            },
            token: registration.token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| AuthError::MissingFields)?;
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AuthError::MissingFields.into());
    };

    let token = state.auth.login(&email, &password).await?;
    info!(%email, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        user: LoginUser { email },
    }))
}

/// Tokens are discarded client-side; this only acknowledges
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logout successful",
    })
}

/// Identity carried by the bearer token
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or(AuthError::NoToken)?;
    let claims = state.auth.verify_token(token).await?;

    Ok(Json(MeResponse {
        user: CurrentUser {
            email: claims.email,
            uid: claims.uid,
        },
    }))
}
