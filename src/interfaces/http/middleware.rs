//! Authentication middleware for Axum
//!
//! A session token is read from `Authorization: Bearer <token>` or, failing
//! that, from the `jwt` cookie. The token's user is loaded from the database
//! and inserted into request extensions as [`AuthenticatedUser`].

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::application::UserService;
use crate::domain::{DomainError, User};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::error::ApiError;

/// Name of the cookie mirroring the session token
pub const AUTH_COOKIE: &str = "jwt";

/// Authentication state
#[derive(Clone)]
pub struct AuthState {
    pub user_service: Arc<UserService<UserRepository>>,
}

/// The signed-in user, as currently stored
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Bearer header first, then the session cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| {
        CookieJar::from_headers(headers)
            .get(AUTH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

fn unauthorized(message: &str) -> Response {
    ApiError::from(DomainError::Unauthorized(message.to_string())).into_response()
}

pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        return unauthorized("Not authorized, no token");
    };

    match auth_state.user_service.authenticate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Must run after [`auth_middleware`]
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => ApiError::from(DomainError::Forbidden("Not authorized as an admin".into()))
            .into_response(),
        None => unauthorized("Not authorized, no token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("jwt=def"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn cookie_is_used_without_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; jwt=def"));
        assert_eq!(extract_token(&headers).as_deref(), Some("def"));
    }

    #[test]
    fn cleared_cookie_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("jwt="));
        assert!(extract_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert!(extract_token(&headers).is_none());
    }
}
