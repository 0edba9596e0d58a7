//! # 포럼 모델 정의
//!
//! 포럼(Forum)과 모더레이터/즐겨찾기 관계에서 사용하는 구조체들입니다.
//!
//! ## 구조체 역할
//! - `Forum`: `forums` 테이블 한 행 (응답용)
//! - `ForumDetail`: 단일 포럼 조회 응답: 포럼 정보 + 모더레이터 ID 목록
//! - `CreateForumRequest`: 포럼 생성 시 클라이언트가 보내는 JSON 본문
//! - `PromoteModeratorRequest`: 모더레이터 지정 시 클라이언트가 보내는 JSON 본문

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 포럼 엔티티: DB의 `forums` 테이블 한 행(row)에 대응합니다.
///
/// 테이블 컬럼 이름(`forum_id`, `forum_name`)은 SELECT 절에서
/// `AS id`, `AS name`으로 별칭을 붙여 이 구조체의 필드에 매핑됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Forum {
    /// 포럼 고유 식별자 (DB가 할당하는 정수)
    pub id: i64,
    /// 포럼 이름
    pub name: String,
    /// 마지막 활동 시각: 새 게시글이 작성될 때마다 갱신됩니다.
    /// NaiveDateTime: 타임존 정보가 없는 "로컬" 날짜/시간 타입
    pub last_interaction: NaiveDateTime,
}

/// `GET /api/v1/forums/{id}` 응답.
///
/// `#[serde(flatten)]`: 내부 Forum의 필드를 한 단계 위로 펼쳐서
/// `{ "id": 1, "name": "...", "last_interaction": "...", "moderator_ids": [..] }`
/// 형태로 직렬화합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumDetail {
    #[serde(flatten)]
    pub forum: Forum,
    pub moderator_ids: Vec<i64>,
}

/// 포럼 생성 요청: `POST /api/v1/forums`의 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateForumRequest {
    pub name: String,
}

/// 모더레이터 지정 요청: `POST /api/v1/forums/{id}/mods`의 요청 본문
///
/// 포럼 ID는 URL 경로에서, 대상 사용자는 본문의 `user_id`로 지정합니다.
#[derive(Debug, Deserialize)]
pub struct PromoteModeratorRequest {
    pub user_id: i64,
}
