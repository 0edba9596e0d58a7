//! # 게시글 데이터베이스 쿼리 모듈
//!
//! `posts` 테이블에 대한 조회/생성/삭제 쿼리입니다.
//! 작성과 삭제는 서비스 계층(`services::posts`)에서 검증과 권한 확인을 거친 뒤 호출됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{SqliteConnection, SqlitePool};

/// 모든 게시글을 조회합니다 (작성 순서대로).
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>, AppError> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT post_id AS id, forum_id, author_id, content, created_at
        FROM posts
        ORDER BY post_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// ID로 게시글 하나를 조회합니다.
///
/// 없으면 `Ok(None)`: 라우트 핸들러가 404로 변환합니다.
pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<Post>, AppError> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT post_id AS id, forum_id, author_id, content, created_at
        FROM posts
        WHERE post_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// 특정 포럼에 속한 게시글들을 오래된 순으로 조회합니다.
pub async fn list_posts_by_forum(pool: &SqlitePool, forum_id: i64) -> Result<Vec<Post>, AppError> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT post_id AS id, forum_id, author_id, content, created_at
        FROM posts
        WHERE forum_id = ?
        ORDER BY created_at, post_id
        "#,
    )
    .bind(forum_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// 새 게시글을 삽입하고 삽입된 행을 그대로 돌려받습니다.
///
/// 포럼의 `last_interaction` 갱신과 같은 트랜잭션에서 실행되도록
/// 연결(`SqliteConnection`)을 받습니다.
pub async fn create_post(
    conn: &mut SqliteConnection,
    forum_id: i64,
    author_id: i64,
    content: &str,
) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (forum_id, author_id, content)
        VALUES (?, ?, ?)
        RETURNING post_id AS id, forum_id, author_id, content, created_at
        "#,
    )
    .bind(forum_id)
    .bind(author_id)
    .bind(content)
    .fetch_one(&mut *conn)
    .await?;

    Ok(post)
}

/// 게시글을 삭제합니다.
///
/// ## 반환값
/// - `true`: 삭제됨
/// - `false`: 해당 ID의 게시글이 없었음
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE post_id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::test_utils::{create_test_user, test_pool};

    #[tokio::test]
    async fn create_and_read_back_posts() {
        let pool = test_pool().await;
        let author = create_test_user(&pool, "alice").await;
        let rust = db::create_forum(&pool, "Rust", author.id).await.unwrap();
        let go = db::create_forum(&pool, "Go", author.id).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let first = create_post(&mut *conn, rust.id, author.id, "hello").await.unwrap();
        let second = create_post(&mut *conn, go.id, author.id, "world").await.unwrap();
        let third = create_post(&mut *conn, rust.id, author.id, "again").await.unwrap();
        drop(conn);

        assert_eq!(first.forum_id, rust.id);
        assert_eq!(first.author_id, author.id);
        assert_eq!(first.content, "hello");

        let all: Vec<i64> = list_posts(&pool).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(all, vec![first.id, second.id, third.id]);

        let in_rust: Vec<i64> = list_posts_by_forum(&pool, rust.id)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(in_rust, vec![first.id, third.id]);

        let fetched = get_post(&pool, second.id).await.unwrap().unwrap();
        assert_eq!(fetched.content, "world");
    }

    #[tokio::test]
    async fn get_post_returns_none_when_absent() {
        let pool = test_pool().await;
        assert!(get_post(&pool, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_post_reports_whether_a_row_was_removed() {
        let pool = test_pool().await;
        let author = create_test_user(&pool, "alice").await;
        let forum = db::create_forum(&pool, "Rust", author.id).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let post = create_post(&mut *conn, forum.id, author.id, "bye").await.unwrap();
        drop(conn);

        assert!(delete_post(&pool, post.id).await.unwrap());
        assert!(!delete_post(&pool, post.id).await.unwrap());
        assert!(get_post(&pool, post.id).await.unwrap().is_none());
    }
}
