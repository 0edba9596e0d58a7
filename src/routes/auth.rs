//! # 인증 라우트 핸들러
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | POST | /api/v1/auth/register | - | 회원가입 + 토큰 발급 |
//! | POST | /api/v1/auth/login | - | 로그인 + 토큰 발급 |
//! | POST | /api/v1/auth/refresh | - | 리프레시 토큰 교체 (rotation) |
//! | POST | /api/v1/auth/logout | 필요 | 내 리프레시 토큰 전부 폐기 |
//! | GET | /api/v1/auth/me | 필요 | 내 정보 |

use crate::{
    db::users as db_users,
    error::AppError,
    middleware::auth::{create_access_token, create_refresh_token, hash_token, verify_token, AuthUser, TokenKind},
    models::user::*,
    routes::{extract::AppJson, AppState},
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// refresh_tokens.expires_at 저장 형식
const EXPIRES_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// 액세스/리프레시 토큰을 새로 발급하고, 리프레시 토큰의 해시를 DB에 저장합니다.
async fn issue_session(pool: &SqlitePool, user: User, secret: &str) -> Result<AuthResponse, AppError> {
    let access_token = create_access_token(&user, secret)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;
    let refresh_token = create_refresh_token(&user, secret)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    let token_id = uuid::Uuid::now_v7().to_string();
    let expires_at = (Utc::now() + Duration::days(7))
        .format(EXPIRES_AT_FORMAT)
        .to_string();
    db_users::store_refresh_token(pool, &token_id, user.id, &hash_token(&refresh_token), &expires_at).await?;

    Ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let username = req.username.trim();
    if username.chars().count() < 3 {
        return Err(AppError::Validation("Username must be at least 3 characters".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".to_string()));
    }

    // 빈 문자열 이메일은 "없음"으로 취급
    let email = req.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    if let Some(email) = email {
        if !email.contains('@') {
            return Err(AppError::Validation("Invalid email address".to_string()));
        }
        if db_users::find_by_email(&state.pool, email).await?.is_some() {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
    }

    if db_users::find_by_username(&state.pool, username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    // Argon2id + 무작위 salt
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    let user = db_users::create_user(&state.pool, username, email, &password_hash, Role::User).await?;
    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok(Json(issue_session(&state.pool, user, &state.jwt_secret).await?))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = db_users::find_by_username(&state.pool, req.username.trim())
        .await?
        .ok_or(AppError::Unauthorized("Invalid username or password".to_string()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    if Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::warn!(username = %user.username, "failed login attempt");
        return Err(AppError::Unauthorized("Invalid username or password".to_string()));
    }

    Ok(Json(issue_session(&state.pool, user, &state.jwt_secret).await?))
}

/// 리프레시 토큰은 한 번만 쓸 수 있습니다. 사용하면 삭제되고 새 토큰 쌍이 발급됩니다.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(req): AppJson<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    verify_token(&req.refresh_token, &state.jwt_secret, TokenKind::Refresh)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let token_hash = hash_token(&req.refresh_token);
    let (_token_id, user_id, expires_at) = db_users::find_refresh_token(&state.pool, &token_hash)
        .await?
        .ok_or(AppError::Unauthorized("Refresh token not found or revoked".to_string()))?;

    // 이후 어떤 경로로 끝나든 기존 토큰은 폐기
    db_users::delete_refresh_token(&state.pool, &token_hash).await?;

    let expires = chrono::NaiveDateTime::parse_from_str(&expires_at, EXPIRES_AT_FORMAT)
        .map_err(|e| AppError::Internal(format!("Date parse error: {}", e)))?;
    if expires.and_utc() < Utc::now() {
        return Err(AppError::Unauthorized("Refresh token expired".to_string()));
    }

    let user = db_users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Unauthorized("User not found".to_string()))?;

    Ok(Json(issue_session(&state.pool, user, &state.jwt_secret).await?))
}

pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    db_users::delete_user_refresh_tokens(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, "user logged out");

    Ok(Json(json!({ "message": "Logged out successfully" })))
}

pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = db_users::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use crate::models::{AuthResponse, Role, UserResponse};
    use crate::test_utils::{test_pool, test_server};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn credentials(username: &str) -> Value {
        json!({ "username": username, "password": "correct horse battery" })
    }

    #[tokio::test]
    async fn register_then_login_and_me() {
        let server = test_server(test_pool().await);

        let registered: AuthResponse = server
            .post("/auth/register")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "correct horse battery"
            }))
            .await
            .json();
        assert_eq!(registered.user.username, "alice");
        assert_eq!(registered.user.role, Role::User);

        let login = server.post("/auth/login").json(&credentials("alice")).await;
        login.assert_status_ok();
        let session: AuthResponse = login.json();

        let me: UserResponse = server
            .get("/auth/me")
            .add_header("authorization", &format!("Bearer {}", session.access_token))
            .await
            .json();
        assert_eq!(me.id, registered.user.id);
        assert_eq!(me.email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let server = test_server(test_pool().await);

        server.post("/auth/register").json(&credentials("alice")).await.assert_status_ok();
        server
            .post("/auth/register")
            .json(&credentials("alice"))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn register_field_rules_are_validation_errors() {
        let server = test_server(test_pool().await);

        for body in [
            json!({ "username": "al", "password": "long enough pw" }),
            json!({ "username": "alice", "password": "short" }),
            json!({ "username": "alice", "email": "nope", "password": "long enough pw" }),
        ] {
            let response = server.post("/auth/register").json(&body).await;
            response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
            let error: Value = response.json();
            assert_eq!(error["error"]["code"], "validation_error");
        }
    }

    #[tokio::test]
    async fn register_with_missing_field_uses_error_envelope() {
        let server = test_server(test_pool().await);

        let response = server
            .post("/auth/register")
            .json(&json!({ "username": "alice" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = response.json();
        assert_eq!(error["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let server = test_server(test_pool().await);
        server.post("/auth/register").json(&credentials("alice")).await.assert_status_ok();

        server
            .post("/auth/login")
            .json(&json!({ "username": "alice", "password": "wrong password" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_token_is_single_use() {
        let server = test_server(test_pool().await);
        let session: AuthResponse = server.post("/auth/register").json(&credentials("alice")).await.json();

        let rotated = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": session.refresh_token }))
            .await;
        rotated.assert_status_ok();
        let rotated: AuthResponse = rotated.json();
        assert_ne!(rotated.refresh_token, session.refresh_token);

        server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": session.refresh_token }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn access_token_cannot_be_used_as_refresh_token() {
        let server = test_server(test_pool().await);
        let session: AuthResponse = server.post("/auth/register").json(&credentials("alice")).await.json();

        server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": session.access_token }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn logout_revokes_refresh_tokens() {
        let server = test_server(test_pool().await);
        let session: AuthResponse = server.post("/auth/register").json(&credentials("alice")).await.json();

        server
            .post("/auth/logout")
            .add_header("authorization", &format!("Bearer {}", session.access_token))
            .await
            .assert_status_ok();

        server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": session.refresh_token }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
