//! # 포럼(Forum) 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 인증 | 핸들러 | 설명 |
//! |--------|------|------|--------|------|
//! | GET | /api/v1/forums | - | `list_forums` | 최근 활동 순 포럼 목록 |
//! | POST | /api/v1/forums | 필요 | `create_forum` | 포럼 생성 (생성자 = 모더레이터) |
//! | GET | /api/v1/forums/search?q= | - | `search_forums` | 이름 부분 검색 |
//! | GET | /api/v1/forums/{id} | - | `get_forum` | 포럼 + 모더레이터 ID |
//! | GET | /api/v1/forums/{id}/posts | - | `list_forum_posts` | 포럼의 게시글 |
//! | GET | /api/v1/forums/{id}/mods | - | `list_moderators` | 모더레이터 ID 목록 |
//! | POST | /api/v1/forums/{id}/mods | 필요 | `promote_moderator` | 모더레이터 지정 |
//! | POST | /api/v1/forums/{id}/favorite | 필요 | `add_favorite` | 즐겨찾기 추가 |

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{
        extract::{AppJson, AppPath, AppQuery},
        AppState,
    },
    services,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// `GET /forums/search?q=키워드`의 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// `GET /forums` → `{ "forums": [...] }`
pub async fn list_forums(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let forums = db::list_forums(&state.pool).await?;
    Ok(Json(json!({ "forums": forums })))
}

/// `GET /forums/search?q=...` → `{ "forums": [...] }`
///
/// 공백뿐인 검색어는 400 Bad Request.
pub async fn search_forums(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(AppError::BadRequest(
            "Search query cannot be empty".to_string(),
        ));
    }

    let forums = db::search_forums(&state.pool, q).await?;
    Ok(Json(json!({ "forums": forums })))
}

/// `GET /forums/{id}` → 포럼 정보 + `moderator_ids`
pub async fn get_forum(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ForumDetail>, AppError> {
    let detail = services::forums::get_forum_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// `POST /forums` + `{ "name": "..." }` → `201 Created`
pub async fn create_forum(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<CreateForumRequest>,
) -> Result<(StatusCode, Json<Forum>), AppError> {
    let forum = services::forums::create_forum(&state.pool, &auth_user, &req).await?;
    Ok((StatusCode::CREATED, Json(forum)))
}

/// `GET /forums/{id}/posts` → `{ "posts": [...] }`
///
/// 존재하지 않는 포럼이면 빈 배열 대신 404를 반환합니다.
pub async fn list_forum_posts(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    if db::get_forum(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let posts = db::list_posts_by_forum(&state.pool, id).await?;
    Ok(Json(json!({ "posts": posts })))
}

/// `GET /forums/{id}/mods` → `{ "moderator_ids": [...] }`
pub async fn list_moderators(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    if db::get_forum(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let moderator_ids = db::list_moderator_ids(&state.pool, id).await?;
    Ok(Json(json!({ "moderator_ids": moderator_ids })))
}

/// `POST /forums/{id}/mods` + `{ "user_id": 3 }` → `201 Created`
pub async fn promote_moderator(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<PromoteModeratorRequest>,
) -> Result<StatusCode, AppError> {
    services::forums::promote_to_moderator(&state.pool, &auth_user, id, req.user_id).await?;
    Ok(StatusCode::CREATED)
}

/// `POST /forums/{id}/favorite` → `201 Created`
pub async fn add_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    services::forums::add_favorite(&state.pool, &auth_user, id).await?;
    Ok(StatusCode::CREATED)
}
