//! # 게시글(Post) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | GET | /api/v1/posts | - | 전체 게시글 목록 |
//! | GET | /api/v1/posts/{id} | - | 단일 게시글 |
//! | POST | /api/v1/posts | 필요 | 게시글 작성 → 201 |
//! | DELETE | /api/v1/posts | 필요 | 게시글 삭제 (본문의 `id`) → 204 |
//!
//! 포럼별 게시글 목록(`GET /forums/{id}/posts`)은 `routes::forums`에 있습니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{
        extract::{AppJson, AppPath},
        AppState,
    },
    services,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

/// `GET /posts` → `{ "posts": [...] }`
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let posts = db::list_posts(&state.pool).await?;
    Ok(Json(json!({ "posts": posts })))
}

/// `GET /posts/{id}`: 없으면 404
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Post>, AppError> {
    let post = db::get_post(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(post))
}

/// `POST /posts` + `{ "forum_id": 1, "content": "..." }` → `201 Created`
///
/// `auth_user: AuthUser` 추출자가 있으므로 토큰 없이 호출하면 401이 반환됩니다.
pub async fn create_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let post = services::posts::create_post(&state.pool, &auth_user, &req).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `DELETE /posts` + `{ "id": 1, ... }` → `204 No Content`
///
/// 권한이 없으면 403, 게시글이 없으면 404.
pub async fn delete_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<DeletePostRequest>,
) -> Result<StatusCode, AppError> {
    services::posts::delete_post(&state.pool, &auth_user, req.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
