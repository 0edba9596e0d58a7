//! # 포럼 서비스
//!
//! 포럼 생성, 모더레이터 지정, 즐겨찾기 추가에 필요한 검증과 권한 확인을 담당합니다.

use crate::{db, error::AppError, middleware::auth::AuthUser, models::*};
use sqlx::SqlitePool;

/// 포럼 이름의 최대 길이 (문자 수)
pub const MAX_FORUM_NAME_CHARS: usize = 100;

/// 포럼과 모더레이터 ID 목록을 함께 조회합니다.
pub async fn get_forum_detail(pool: &SqlitePool, id: i64) -> Result<ForumDetail, AppError> {
    let forum = db::get_forum(pool, id).await?.ok_or(AppError::NotFound)?;
    let moderator_ids = db::list_moderator_ids(pool, forum.id).await?;
    Ok(ForumDetail {
        forum,
        moderator_ids,
    })
}

/// 새 포럼을 만들고 호출자를 첫 모더레이터로 등록합니다.
///
/// 이름은 앞뒤 공백을 제거한 뒤 1~100자여야 합니다.
pub async fn create_forum(
    pool: &SqlitePool,
    creator: &AuthUser,
    req: &CreateForumRequest,
) -> Result<Forum, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Forum name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_FORUM_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "Forum name cannot exceed {} characters",
            MAX_FORUM_NAME_CHARS
        )));
    }

    let forum = db::create_forum(pool, name, creator.user_id).await?;
    tracing::info!(forum_id = forum.id, creator = %creator.username, "forum created");
    Ok(forum)
}

/// 사용자를 포럼의 모더레이터로 지정합니다.
///
/// ## 에러
/// - `NotFound`: 포럼이 없음
/// - `Forbidden`: 호출자가 이 포럼의 모더레이터도 관리자도 아님
/// - `Validation`: 대상 사용자가 없음
/// - `Conflict`: 이미 모더레이터임
pub async fn promote_to_moderator(
    pool: &SqlitePool,
    caller: &AuthUser,
    forum_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    db::get_forum(pool, forum_id).await?.ok_or(AppError::NotFound)?;

    if !caller.is_admin() && !db::is_moderator(pool, forum_id, caller.user_id).await? {
        return Err(AppError::Forbidden(
            "Only moderators of this forum can appoint moderators".to_string(),
        ));
    }

    if db::users::find_by_id(pool, user_id).await?.is_none() {
        return Err(AppError::Validation(format!("User {} does not exist", user_id)));
    }

    if !db::promote_to_moderator(pool, user_id, forum_id).await? {
        return Err(AppError::Conflict(
            "User is already a moderator of this forum".to_string(),
        ));
    }

    tracing::info!(forum_id, user_id, promoted_by = caller.user_id, "moderator added");
    Ok(())
}

/// 호출자의 즐겨찾기에 포럼을 추가합니다.
///
/// 포럼이 없으면 `NotFound`, 이미 즐겨찾기에 있으면 `Conflict`.
pub async fn add_favorite(
    pool: &SqlitePool,
    caller: &AuthUser,
    forum_id: i64,
) -> Result<(), AppError> {
    db::get_forum(pool, forum_id).await?.ok_or(AppError::NotFound)?;

    if !db::add_favorite(pool, forum_id, caller.user_id).await? {
        return Err(AppError::Conflict("Forum is already a favorite".to_string()));
    }

    Ok(())
}
