//! # 게시글 서비스
//!
//! 게시글 작성/삭제 시 필요한 검증과 권한 확인을 수행합니다.
//!
//! ## 삭제 권한
//! 다음 중 하나에 해당하는 호출자만 게시글을 삭제할 수 있습니다:
//! 1. 게시글 작성자
//! 2. 게시글이 속한 포럼의 모더레이터
//! 3. `admin` 권한 사용자

use crate::{db, error::AppError, middleware::auth::AuthUser, models::*};
use sqlx::SqlitePool;

/// 게시글 본문의 최대 길이 (문자 수)
pub const MAX_POST_CHARS: usize = 10_000;

/// 새 게시글을 작성합니다.
///
/// 작성자는 항상 인증된 호출자입니다. 요청 본문으로 다른 사용자를 작성자로 지정할 수 없습니다.
///
/// ## 검증 (실패 시 `AppError::Validation` → 422)
/// - 본문이 공백뿐이거나 `MAX_POST_CHARS`를 넘는 경우
/// - `forum_id`가 존재하지 않는 포럼을 가리키는 경우
///
/// 게시글 INSERT와 포럼의 `last_interaction` 갱신은 하나의 트랜잭션으로 처리됩니다.
pub async fn create_post(
    pool: &SqlitePool,
    author: &AuthUser,
    req: &CreatePostRequest,
) -> Result<Post, AppError> {
    // 공백 검사만 trim 기준이고, 저장은 원문 그대로 (코드 블록 들여쓰기 보존)
    let content = req.content.as_str();
    if content.trim().is_empty() {
        return Err(AppError::Validation("Post content cannot be empty".to_string()));
    }
    if content.chars().count() > MAX_POST_CHARS {
        return Err(AppError::Validation(format!(
            "Post content cannot exceed {} characters",
            MAX_POST_CHARS
        )));
    }

    if db::get_forum(pool, req.forum_id).await?.is_none() {
        return Err(AppError::Validation(format!(
            "Forum {} does not exist",
            req.forum_id
        )));
    }

    let mut tx = pool.begin().await?;
    let post = db::create_post(&mut *tx, req.forum_id, author.user_id, content).await?;
    db::touch_forum(&mut *tx, req.forum_id).await?;
    tx.commit().await?;

    tracing::info!(
        post_id = post.id,
        forum_id = post.forum_id,
        author_id = post.author_id,
        "post created"
    );
    Ok(post)
}

/// 게시글을 삭제합니다.
///
/// ## 반환값
/// - `Ok(())`: 삭제 성공
/// - `Err(AppError::NotFound)`: 게시글이 없음
/// - `Err(AppError::Forbidden)`: 작성자/모더레이터/관리자가 아님 (게시글은 그대로 남음)
pub async fn delete_post(
    pool: &SqlitePool,
    caller: &AuthUser,
    post_id: i64,
) -> Result<(), AppError> {
    let post = db::get_post(pool, post_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !can_delete(pool, caller, &post).await? {
        tracing::warn!(
            post_id = post.id,
            caller_id = caller.user_id,
            "post deletion denied"
        );
        return Err(AppError::Forbidden(
            "Only the author or a forum moderator can delete this post".to_string(),
        ));
    }

    if !db::delete_post(pool, post.id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(post_id = post.id, caller_id = caller.user_id, "post deleted");
    Ok(())
}

async fn can_delete(pool: &SqlitePool, caller: &AuthUser, post: &Post) -> Result<bool, AppError> {
    if post.author_id == caller.user_id || caller.is_admin() {
        return Ok(true);
    }
    db::is_moderator(pool, post.forum_id, caller.user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_admin, create_test_user, principal, test_pool};

    fn request(forum_id: i64, content: &str) -> CreatePostRequest {
        CreatePostRequest {
            forum_id,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn create_post_uses_caller_as_author() {
        let pool = test_pool().await;
        let alice = create_test_user(&pool, "alice").await;
        let forum = db::create_forum(&pool, "Rust", alice.id).await.unwrap();

        let post = create_post(&pool, &principal(&alice), &request(forum.id, "hi there"))
            .await
            .unwrap();

        assert_eq!(post.author_id, alice.id);
        assert_eq!(post.content, "hi there");
    }

    #[tokio::test]
    async fn create_post_keeps_leading_indentation() {
        let pool = test_pool().await;
        let alice = create_test_user(&pool, "alice").await;
        let forum = db::create_forum(&pool, "Rust", alice.id).await.unwrap();
        let snippet = "    fn main() {}\n";

        let post = create_post(&pool, &principal(&alice), &request(forum.id, snippet))
            .await
            .unwrap();
        assert_eq!(post.content, snippet);

        let stored = db::get_post(&pool, post.id).await.unwrap().unwrap();
        assert_eq!(stored.content, snippet);
    }

    #[tokio::test]
    async fn create_post_in_missing_forum_is_a_validation_error() {
        let pool = test_pool().await;
        let alice = create_test_user(&pool, "alice").await;

        let err = create_post(&pool, &principal(&alice), &request(404, "hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(db::list_posts(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_post_rejects_blank_and_oversized_content() {
        let pool = test_pool().await;
        let alice = create_test_user(&pool, "alice").await;
        let forum = db::create_forum(&pool, "Rust", alice.id).await.unwrap();
        let caller = principal(&alice);

        let blank = create_post(&pool, &caller, &request(forum.id, "   ")).await;
        assert!(matches!(blank, Err(AppError::Validation(_))));

        let huge = "x".repeat(MAX_POST_CHARS + 1);
        let oversized = create_post(&pool, &caller, &request(forum.id, &huge)).await;
        assert!(matches!(oversized, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_post_bumps_forum_to_front() {
        let pool = test_pool().await;
        let alice = create_test_user(&pool, "alice").await;
        let quiet = db::create_forum(&pool, "quiet", alice.id).await.unwrap();
        let busy = db::create_forum(&pool, "busy", alice.id).await.unwrap();
        sqlx::query("UPDATE forums SET last_interaction = '2000-01-01 00:00:00.000'")
            .execute(&pool)
            .await
            .unwrap();

        create_post(&pool, &principal(&alice), &request(quiet.id, "ping"))
            .await
            .unwrap();

        let forums = db::list_forums(&pool).await.unwrap();
        assert_eq!(forums[0].id, quiet.id);
        assert_eq!(forums[1].id, busy.id);
    }

    #[tokio::test]
    async fn author_can_delete_own_post() {
        let pool = test_pool().await;
        let alice = create_test_user(&pool, "alice").await;
        let forum = db::create_forum(&pool, "Rust", alice.id).await.unwrap();
        let post = create_post(&pool, &principal(&alice), &request(forum.id, "mine"))
            .await
            .unwrap();

        delete_post(&pool, &principal(&alice), post.id).await.unwrap();
        assert!(db::get_post(&pool, post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stranger_cannot_delete_and_post_is_unchanged() {
        let pool = test_pool().await;
        let owner = create_test_user(&pool, "owner").await;
        let author = create_test_user(&pool, "author").await;
        let stranger = create_test_user(&pool, "stranger").await;
        let forum = db::create_forum(&pool, "Rust", owner.id).await.unwrap();
        let post = create_post(&pool, &principal(&author), &request(forum.id, "keep me"))
            .await
            .unwrap();

        let err = delete_post(&pool, &principal(&stranger), post.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let still_there = db::get_post(&pool, post.id).await.unwrap().unwrap();
        assert_eq!(still_there.content, "keep me");
        assert_eq!(still_there.author_id, author.id);
    }

    #[tokio::test]
    async fn forum_moderator_and_admin_can_delete_others_posts() {
        let pool = test_pool().await;
        let owner = create_test_user(&pool, "owner").await;
        let author = create_test_user(&pool, "author").await;
        let admin = create_test_admin(&pool, "root").await;
        let forum = db::create_forum(&pool, "Rust", owner.id).await.unwrap();

        let first = create_post(&pool, &principal(&author), &request(forum.id, "one"))
            .await
            .unwrap();
        let second = create_post(&pool, &principal(&author), &request(forum.id, "two"))
            .await
            .unwrap();

        // owner는 포럼 생성자이므로 모더레이터
        delete_post(&pool, &principal(&owner), first.id).await.unwrap();
        delete_post(&pool, &principal(&admin), second.id).await.unwrap();
        assert!(db::list_posts(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn moderator_of_another_forum_is_forbidden() {
        let pool = test_pool().await;
        let author = create_test_user(&pool, "author").await;
        let other_mod = create_test_user(&pool, "othermod").await;
        let forum = db::create_forum(&pool, "Rust", author.id).await.unwrap();
        db::create_forum(&pool, "Go", other_mod.id).await.unwrap();

        let post = create_post(&pool, &principal(&author), &request(forum.id, "hi"))
            .await
            .unwrap();

        let result = delete_post(&pool, &principal(&other_mod), post.id).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn deleting_missing_post_is_not_found() {
        let pool = test_pool().await;
        let alice = create_test_user(&pool, "alice").await;

        let result = delete_post(&pool, &principal(&alice), 12345).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
