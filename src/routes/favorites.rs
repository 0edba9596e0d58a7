//! # 즐겨찾기 라우트 핸들러
//!
//! 즐겨찾기 추가는 `POST /forums/{id}/favorite` (`routes::forums`)에 있고,
//! 여기서는 로그인한 사용자의 즐겨찾기 조회만 다룹니다.

use crate::{db, error::AppError, middleware::auth::AuthUser, routes::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /favorites` → `{ "forums": [...] }`
pub async fn list_favorite_forums(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let forums = db::list_favorite_forums(&state.pool, auth_user.user_id).await?;
    Ok(Json(json!({ "forums": forums })))
}

/// `GET /favorites/ids` → `{ "forum_ids": [1, 4, ...] }`
///
/// 프론트엔드가 포럼 목록에 별 표시를 할 때 씁니다.
pub async fn list_favorite_forum_ids(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let forum_ids = db::list_favorite_forum_ids(&state.pool, auth_user.user_id).await?;
    Ok(Json(json!({ "forum_ids": forum_ids })))
}
