//! Authentication middleware and role extractors
//!
//! The middleware validates the bearer token and injects an
//! `AuthenticatedUser` extension. Handlers declare their authorization
//! requirement in the signature: `CurrentUser` for any authenticated
//! user, `AdminUser` for admin-only operations. No role comparison
//! happens inside handler bodies.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};
use crate::interfaces::http::common::ApiError;

/// Authentication state for the middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user information decoded from the JWT
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return ApiError::unauthorized("Missing authentication token").into_response();
    };

    let Some(token) = extract_token(&auth_header) else {
        return ApiError::unauthorized("Invalid authentication token").into_response();
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return ApiError::unauthorized("Token has expired").into_response();
            }
            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) => ApiError::unauthorized("Invalid authentication token").into_response(),
    }
}

/// Extractor for any authenticated user
pub struct CurrentUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))
    }
}

/// Extractor for admin-only operations
pub struct AdminUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

        if !user.is_admin() {
            return Err(ApiError::forbidden("Forbidden"));
        }

        Ok(AdminUser(user))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "u-1".to_string(),
            email: "user@example.com".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token("abc.def.ghi"), None);
        assert_eq!(extract_token("Basic dXNlcg=="), None);
    }

    #[tokio::test]
    async fn admin_extractor_rejects_regular_users() {
        let req = Request::builder()
            .extension(user("user"))
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        assert!(CurrentUser::from_request_parts(&mut parts, &()).await.is_ok());
        let err = AdminUser::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_extractor_accepts_admins() {
        let req = Request::builder()
            .extension(user("admin"))
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        assert!(AdminUser::from_request_parts(&mut parts, &()).await.is_ok());
    }

    #[tokio::test]
    async fn extractors_require_the_middleware() {
        let req = Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let err = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
