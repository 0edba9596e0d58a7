//! 테스트 전용 헬퍼 (`cargo test`에서만 컴파일됩니다).
//!
//! 각 테스트는 마이그레이션이 적용된 독립된 인메모리 SQLite DB를 사용합니다.

use crate::{
    db,
    middleware::auth::{create_access_token, AuthUser},
    models::{Role, User},
    routes::{self, AppState},
};
use axum_test::TestServer;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::time::Duration;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// 인메모리 DB는 연결마다 별개이므로 연결을 하나로 고정하고, 유휴 종료도 끕니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn create_test_user(pool: &SqlitePool, username: &str) -> User {
    db::users::create_user(pool, username, None, "not-a-real-hash", Role::User)
        .await
        .expect("Failed to create test user")
}

pub async fn create_test_admin(pool: &SqlitePool, username: &str) -> User {
    db::users::create_user(pool, username, None, "not-a-real-hash", Role::Admin)
        .await
        .expect("Failed to create test admin")
}

pub fn principal(user: &User) -> AuthUser {
    AuthUser {
        user_id: user.id,
        username: user.username.clone(),
        role: user.role,
    }
}

pub fn test_server(pool: SqlitePool) -> TestServer {
    let state = AppState {
        pool,
        jwt_secret: TEST_JWT_SECRET.to_string(),
    };
    TestServer::new(routes::api_router(state)).expect("Failed to build test server")
}

/// `Authorization` 헤더 값 ("Bearer <access token>")
pub fn bearer(user: &User) -> String {
    let token = create_access_token(user, TEST_JWT_SECRET).expect("Failed to sign token");
    format!("Bearer {}", token)
}
