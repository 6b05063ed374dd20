//! Authentication API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;

use super::dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, ProfileResponse, RegisterRequest,
    ResetPasswordRequest, UpdateProfileRequest,
};
use crate::application::identity::{ProfileUpdate, RegisterUser};
use crate::application::UserService;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{MessageResponse, ValidatedJson};
use crate::interfaces::http::error::{ApiResult, ErrorBody};
use crate::interfaces::http::middleware::{AuthenticatedUser, AUTH_COOKIE};

/// How the session cookie is issued
#[derive(Clone, Debug)]
pub struct CookieSettings {
    pub secure: bool,
    pub max_age_hours: i64,
}

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
    pub cookies: CookieSettings,
}

fn session_cookie(token: String, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(settings.secure)
        .path("/")
        .max_age(time::Duration::hours(settings.max_age_hours))
        .build()
}

fn cleared_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .path("/")
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered and signed in", body = AuthResponse),
        (status = 400, description = "Missing fields, invalid role or existing email", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let result = state
        .user_service
        .register(RegisterUser {
            name: request.name,
            email: request.email,
            password: request.password,
            role: request.role,
        })
        .await?;

    let jar = jar.add(session_cookie(result.token.clone(), &state.cookies));
    Ok((StatusCode::CREATED, jar, Json(result.into())))
}

#[utoipa::path(
    post,
    path = "/api/users/auth",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid email or password", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let result = state
        .user_service
        .login(&request.email, &request.password)
        .await?;

    let jar = jar.add(session_cookie(result.token.clone(), &state.cookies));
    Ok((jar, Json(result.into())))
}

#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = "Authentication",
    responses((status = 200, description = "Session cookie cleared", body = MessageResponse))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(cleared_cookie()),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn get_profile(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ProfileResponse>> {
    let user = state.user_service.profile(user.id()).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid value or email in use", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody)
    )
)]
pub async fn update_profile(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let updated = state
        .user_service
        .update_profile(
            &user.0,
            ProfileUpdate {
                name: request.name,
                email: request.email,
                password: request.password,
                role: request.role,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    post,
    path = "/api/users/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Mail relay failure", body = ErrorBody)
    )
)]
pub async fn forgot_password(
    State(state): State<AuthHandlerState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.user_service.forgot_password(&request.email).await?;
    Ok(Json(MessageResponse::new(
        "Password reset email sent successfully.",
    )))
}

#[utoipa::path(
    post,
    path = "/api/users/reset-password/{token}",
    tag = "Authentication",
    params(("token" = String, Path, description = "Reset token from the emailed link")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Invalid or expired token", body = ErrorBody)
    )
)]
pub async fn reset_password(
    State(state): State<AuthHandlerState>,
    Path(token): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .user_service
        .reset_password(&token, &request.password)
        .await?;
    Ok(Json(MessageResponse::new("Password reset successful")))
}
