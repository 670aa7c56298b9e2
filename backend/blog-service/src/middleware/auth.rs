use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::AppState;

/// Cookie carrying the dashboard session token.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub role: SessionRole,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionRole {
    Admin,
    Editor,
}

#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub user_id: String,
    pub email: String,
    pub role: SessionRole,
}

impl CurrentSession {
    pub fn require_role(&self, allowed: &[SessionRole]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl From<Claims> for CurrentSession {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

pub fn encode_session(claims: &Claims, secret: &str) -> anyhow::Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

fn decode_session(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::Unauthorized
    })
}

/// Session cookie first, then `Authorization: Bearer`.
fn session_token(jar: &CookieJar, bearer: Option<&Authorization<Bearer>>) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    bearer
        .map(|auth| auth.token().to_string())
        .filter(|t| !t.is_empty())
}

pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = bearer.map(|TypedHeader(auth)| auth);
    let token = session_token(&jar, bearer.as_ref()).ok_or(AppError::Unauthorized)?;
    let claims = decode_session(&token, &state.config.auth.jwt_secret)?;

    request
        .extensions_mut()
        .insert(CurrentSession::from(claims));

    Ok(next.run(request).await)
}
