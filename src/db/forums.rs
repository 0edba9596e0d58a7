//! # 포럼 데이터베이스 쿼리 모듈
//!
//! `forums`, `forum_moderators`, `favorite_forums` 테이블에 대한 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `forums`: 포럼 엔티티 (forum_id, forum_name, last_interaction)
//! - `forum_moderators`: 포럼 ↔ 모더레이터(사용자) 관계, PRIMARY KEY (forum_id, mod_id)
//! - `favorite_forums`: 포럼 ↔ 즐겨찾기한 사용자 관계, PRIMARY KEY (forum_id, user_id)
//!
//! 관계 테이블은 복합 기본키를 가지므로 같은 쌍이 두 번 저장될 수 없습니다.
//! 삽입 함수는 `INSERT OR IGNORE`를 사용하고, 실제로 행이 추가되었는지를
//! `bool`로 돌려줍니다. 중복을 에러(409)로 바꿀지는 서비스 계층이 결정합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{SqliteConnection, SqlitePool};

/// 모든 포럼을 최근 활동 순(내림차순)으로 조회합니다.
///
/// `last_interaction`이 같으면 나중에 만들어진 포럼(id가 큰 쪽)이 먼저 옵니다.
pub async fn list_forums(pool: &SqlitePool) -> Result<Vec<Forum>, AppError> {
    let forums = sqlx::query_as::<_, Forum>(
        r#"
        SELECT forum_id AS id, forum_name AS name, last_interaction
        FROM forums
        ORDER BY last_interaction DESC, forum_id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(forums)
}

/// ID로 포럼 하나를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Forum))`: 포럼을 찾은 경우
/// - `Ok(None)`: 해당 ID의 포럼이 없는 경우 (빈 Forum 객체를 만들어 돌려주지 않습니다)
pub async fn get_forum(pool: &SqlitePool, id: i64) -> Result<Option<Forum>, AppError> {
    let forum = sqlx::query_as::<_, Forum>(
        r#"
        SELECT forum_id AS id, forum_name AS name, last_interaction
        FROM forums
        WHERE forum_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(forum)
}

/// 새 포럼을 만들고, 생성자를 첫 번째 모더레이터로 등록합니다.
///
/// ## 트랜잭션
/// 두 번의 INSERT(포럼, 모더레이터)를 하나의 트랜잭션으로 묶습니다.
/// 두 번째 INSERT가 실패하면(예: 존재하지 않는 사용자) `?`로 함수를 빠져나가면서
/// `tx`가 drop되고, sqlx가 자동으로 ROLLBACK합니다.
/// 따라서 모더레이터 없는 포럼이 남는 일은 없습니다.
pub async fn create_forum(
    pool: &SqlitePool,
    name: &str,
    creator_id: i64,
) -> Result<Forum, AppError> {
    let mut tx = pool.begin().await?;

    // RETURNING: INSERT와 동시에 DB가 할당한 forum_id를 돌려받습니다.
    let (forum_id,): (i64,) =
        sqlx::query_as("INSERT INTO forums (forum_name) VALUES (?) RETURNING forum_id")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

    sqlx::query("INSERT INTO forum_moderators (forum_id, mod_id) VALUES (?, ?)")
        .bind(forum_id)
        .bind(creator_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    get_forum(pool, forum_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created forum".to_string()))
}

/// 포럼의 마지막 활동 시각을 현재 시각으로 갱신합니다.
///
/// 게시글 작성 트랜잭션 안에서 호출되므로 풀이 아닌 연결(`SqliteConnection`)을 받습니다.
pub async fn touch_forum(conn: &mut SqliteConnection, forum_id: i64) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE forums SET last_interaction = strftime('%Y-%m-%d %H:%M:%f', 'now') WHERE forum_id = ?",
    )
    .bind(forum_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// 포럼의 모더레이터 사용자 ID 목록을 오름차순으로 조회합니다.
pub async fn list_moderator_ids(pool: &SqlitePool, forum_id: i64) -> Result<Vec<i64>, AppError> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT mod_id FROM forum_moderators WHERE forum_id = ? ORDER BY mod_id")
            .bind(forum_id)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// 사용자가 해당 포럼의 모더레이터인지 확인합니다.
pub async fn is_moderator(pool: &SqlitePool, forum_id: i64, user_id: i64) -> Result<bool, AppError> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM forum_moderators WHERE forum_id = ? AND mod_id = ?")
            .bind(forum_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    Ok(row.is_some())
}

/// 사용자를 포럼의 모더레이터로 지정합니다.
///
/// ## 반환값
/// - `true`: 새로 지정됨
/// - `false`: 이미 모더레이터였음 (행이 추가되지 않음)
pub async fn promote_to_moderator(
    pool: &SqlitePool,
    user_id: i64,
    forum_id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query("INSERT OR IGNORE INTO forum_moderators (forum_id, mod_id) VALUES (?, ?)")
        .bind(forum_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 사용자가 즐겨찾기한 포럼 ID 목록을 조회합니다.
pub async fn list_favorite_forum_ids(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>, AppError> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT forum_id FROM favorite_forums WHERE user_id = ? ORDER BY forum_id")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// 사용자가 즐겨찾기한 포럼들을 조회합니다.
///
/// `favorite_forums` 중간 테이블을 JOIN하여 포럼 정보를 함께 가져옵니다.
///
/// ```sql
/// users ←── favorite_forums ──→ forums
/// ```
pub async fn list_favorite_forums(pool: &SqlitePool, user_id: i64) -> Result<Vec<Forum>, AppError> {
    let forums = sqlx::query_as::<_, Forum>(
        r#"
        SELECT f.forum_id AS id, f.forum_name AS name, f.last_interaction
        FROM favorite_forums ff
        JOIN forums f ON ff.forum_id = f.forum_id
        WHERE ff.user_id = ?
        ORDER BY f.last_interaction DESC, f.forum_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(forums)
}

/// 포럼을 사용자의 즐겨찾기에 추가합니다.
///
/// ## 반환값
/// - `true`: 새로 추가됨
/// - `false`: 이미 즐겨찾기에 있었음
pub async fn add_favorite(pool: &SqlitePool, forum_id: i64, user_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("INSERT OR IGNORE INTO favorite_forums (forum_id, user_id) VALUES (?, ?)")
        .bind(forum_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 포럼 이름으로 검색합니다 (대소문자 구분 없는 부분 문자열 일치).
///
/// SQLite의 `LOWER()`/`LIKE`는 ASCII만 대소문자를 접으므로,
/// 이름과 검색어를 모두 Rust의 `to_lowercase()`로 접어서 비교합니다.
/// 예: `"über"` → "ÜBER Café" 일치
///
/// 패턴 매칭이 아닌 단순 포함 검사이므로 `%`, `_`도 문자 그대로 취급됩니다.
/// 결과 순서는 `list_forums`와 같습니다.
pub async fn search_forums(pool: &SqlitePool, query: &str) -> Result<Vec<Forum>, AppError> {
    let needle = query.to_lowercase();

    let forums = list_forums(pool)
        .await?
        .into_iter()
        .filter(|forum| forum.name.to_lowercase().contains(&needle))
        .collect();

    Ok(forums)
}
