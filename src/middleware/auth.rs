use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::models::{Role, User};
use crate::routes::AppState;

/// 토큰 종류: refresh 토큰을 access 토큰 자리에 쓰지 못하게 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub username: String,
    pub role: Role,
    pub typ: TokenKind,
    /// 같은 초에 발급된 토큰끼리도 서로 다른 값이 되도록 넣는 고유 ID
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

/// 서명이 검증된 토큰에서 꺼낸 호출자 정보(principal).
///
/// 핸들러가 이 타입을 인자로 받으면 그 라우트는 인증이 필요한 라우트가 됩니다.
/// 권한 판단은 표시 이름이 아닌 `user_id`를 기준으로 합니다.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let claims = verify_token(token, &state.jwt_secret, TokenKind::Access)?;
        AuthUser::try_from(claims)
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthUser {
            user_id,
            username: claims.username,
            role: claims.role,
        })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "Authorization token is required",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid authorization token",
            ),
            AuthError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "expired_token",
                "Authorization token has expired",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn issue_token(
    user: &User,
    kind: TokenKind,
    lifetime: Duration,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        typ: kind,
        jti: uuid::Uuid::now_v7().to_string(),
        iat: now.timestamp(),
        exp: (now + lifetime).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn create_access_token(user: &User, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token(user, TokenKind::Access, Duration::minutes(15), secret)
}

pub fn create_refresh_token(user: &User, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token(user, TokenKind::Refresh, Duration::days(7), secret)
}

pub fn verify_token(token: &str, secret: &str, expected: TokenKind) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    if token_data.claims.typ != expected {
        return Err(AuthError::InvalidToken);
    }

    Ok(token_data.claims)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn sample_user() -> User {
        User {
            id: 7,
            username: "alice".to_string(),
            email: None,
            password_hash: String::new(),
            role: Role::Admin,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn access_token_round_trips_into_principal() {
        let token = create_access_token(&sample_user(), SECRET).unwrap();
        let claims = verify_token(&token, SECRET, TokenKind::Access).unwrap();
        let principal = AuthUser::try_from(claims).unwrap();

        assert_eq!(principal.user_id, 7);
        assert_eq!(principal.username, "alice");
        assert!(principal.is_admin());
    }

    #[test]
    fn refresh_token_is_not_accepted_as_access_token() {
        let token = create_refresh_token(&sample_user(), SECRET).unwrap();
        assert!(matches!(
            verify_token(&token, SECRET, TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
        assert!(verify_token(&token, SECRET, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn tokens_issued_back_to_back_differ() {
        let user = sample_user();
        let a = create_refresh_token(&user, SECRET).unwrap();
        let b = create_refresh_token(&user, SECRET).unwrap();
        assert_ne!(hash_token(&a), hash_token(&b));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = create_access_token(&sample_user(), SECRET).unwrap();
        assert!(matches!(
            verify_token(&token, "other-secret", TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "7".to_string(),
            username: "alice".to_string(),
            role: Role::User,
            typ: TokenKind::Access,
            jti: "jti".to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(15)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, SECRET, TokenKind::Access),
            Err(AuthError::ExpiredToken)
        ));
    }
}
