//! # 게시글 모델 정의

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 게시글 엔티티: `posts` 테이블 한 행에 대응합니다.
///
/// 하나의 게시글은 정확히 하나의 포럼(`forum_id`)에 속하고,
/// 한 명의 작성자(`author_id`)를 가집니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub forum_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// 게시글 생성 요청: `POST /api/v1/posts`
///
/// 작성자 ID는 본문에 없습니다. 인증된 호출자(AuthUser)의 ID가 작성자가 됩니다.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub forum_id: i64,
    pub content: String,
}

/// 게시글 삭제 요청: `DELETE /api/v1/posts`
///
/// 클라이언트는 게시글 전체를 보낼 수도 있지만, 서버는 `id`만 사용합니다.
/// 권한 판단에 필요한 작성자/포럼 정보는 항상 DB에 저장된 값을 기준으로 합니다.
#[derive(Debug, Deserialize)]
pub struct DeletePostRequest {
    pub id: i64,
}
