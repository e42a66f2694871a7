//! Authentication middleware and extractors.
//!
//! The middleware validates Bearer tokens through the `TokenVerifier` port
//! and injects the resulting `Principal` into request extensions; the
//! `RequireAuth` and `RequireAdmin` extractors read it back out. Which
//! provider mints the tokens is invisible here.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, Principal};
use crate::ports::TokenVerifier;

/// Auth middleware state - the token verifier port.
pub type AuthState = Arc<dyn TokenVerifier>;

/// Validates the Bearer token, if any, and stashes the principal.
///
/// A missing token passes through without a principal so that routes using
/// `RequireAuth` reject it with 401 while any future public route still
/// works. An invalid token is rejected immediately.
pub async fn auth_middleware(
    State(verifier): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match verifier.verify(token).await {
            Ok(principal) => {
                request.extensions_mut().insert(principal);
                next.run(request).await
            }
            Err(e) => {
                let message = match &e {
                    AuthError::TokenExpired => "Token expired",
                    _ => "Token is invalid or has expired",
                };
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": message,
                        "code": "AUTH_ERROR"
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor requiring an authenticated principal.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Principal);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor requiring an authenticated admin principal.
///
/// Distinct failure modes: 401 when nobody is logged in, 403 when the
/// caller is authenticated but not an admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Principal);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let principal = parts
                .extensions
                .get::<Principal>()
                .cloned()
                .ok_or(AuthRejection::Unauthenticated)?;
            if !principal.is_admin() {
                return Err(AuthRejection::NotAdmin);
            }
            Ok(RequireAdmin(principal))
        })
    }
}

/// Rejection type for the auth extractors.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
    /// The caller is authenticated but lacks the admin role.
    NotAdmin,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required",
            ),
            AuthRejection::NotAdmin => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Action requires admin permissions",
            ),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": code
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockTokenVerifier;
    use crate::domain::foundation::UserId;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    fn principal(admin: bool) -> Principal {
        Principal::new(UserId::new(3), "test@example.com", admin)
    }

    #[tokio::test]
    async fn verifier_resolves_registered_token() {
        let verifier: Arc<dyn TokenVerifier> =
            Arc::new(MockTokenVerifier::new().with_user("valid", 3));
        let result = verifier.verify("valid").await;
        assert_eq!(result.unwrap().id, UserId::new(3));
    }

    #[tokio::test]
    async fn require_auth_reads_principal_from_extensions() {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(principal(false));
        let (mut parts, _) = request.into_parts();

        let RequireAuth(got) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(got.id, UserId::new(3));
    }

    #[tokio::test]
    async fn require_auth_rejects_without_principal() {
        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn require_admin_rejects_plain_user_with_forbidden() {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(principal(false));
        let (mut parts, _) = request.into_parts();

        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::NotAdmin)));
    }

    #[tokio::test]
    async fn require_admin_accepts_admin() {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(principal(true));
        let (mut parts, _) = request.into_parts();

        assert!(RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .is_ok());
    }

    #[test]
    fn rejection_statuses() {
        assert_eq!(
            AuthRejection::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::NotAdmin.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
