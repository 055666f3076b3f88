use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::JsonApiError;
use service::{auth::FirebaseTokenVerifier, chatbot::ChatbotClient, user_service};

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub verifier: Arc<FirebaseTokenVerifier>,
    pub chatbot: Arc<ChatbotClient>,
}

/// Verified caller identity, attached to the request by the token middleware.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == models::user::ROLE_ADMIN
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Global middleware: verify the Firebase ID token on every request except
/// the whitelist, resolve the caller's role from the profile row, and attach
/// an `AuthUser` to the request. Missing or invalid tokens get 401.
pub async fn require_firebase_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_owned();

    // Whitelist: health check, profile registration, API docs, CORS preflight
    if path == "/health"
        || path == "/api/user/register"
        || path.starts_with("/api-docs")
        || req.method() == Method::OPTIONS
    {
        return Ok(next.run(req).await);
    }

    let Some(token) = bearer_token(&req).map(str::to_owned) else {
        warn!(path = %path, "missing or malformed Authorization header");
        return Err(JsonApiError::new(
            StatusCode::UNAUTHORIZED,
            "missing or invalid token",
            None,
        ));
    };

    let decoded = match state.verifier.verify(&token).await {
        Ok(d) => d,
        Err(e) => {
            warn!(path = %path, err = %e, "token verification failed");
            return Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "invalid token", None));
        }
    };

    // Role comes from the profile row; a verified token without a profile
    // acts as a student until /api/user/register has been called.
    let role = match user_service::get_user(&state.db, &decoded.uid).await {
        Ok(Some(u)) => u.role,
        Ok(None) => models::user::ROLE_STUDENT.to_string(),
        Err(e) => return Err(JsonApiError::from(e)),
    };

    req.extensions_mut().insert(AuthUser {
        uid: decoded.uid,
        email: decoded.email,
        role,
    });
    Ok(next.run(req).await)
}

/// Route-level gate for admin-only endpoints; runs after the token
/// middleware, so the extension is present on any authenticated request.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, JsonApiError> {
    let Some(auth) = req.extensions().get::<AuthUser>() else {
        return Err(JsonApiError::new(
            StatusCode::UNAUTHORIZED,
            "missing or invalid token",
            None,
        ));
    };
    if !auth.is_admin() {
        warn!(uid = %auth.uid, role = %auth.role, "admin route denied");
        return Err(JsonApiError::new(StatusCode::FORBIDDEN, "admin role required", None));
    }
    Ok(next.run(req).await)
}
