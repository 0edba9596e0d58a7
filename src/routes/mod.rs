//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과, 이들을 URL에 연결하는 라우터를 정의합니다.
//!
//! 각 하위 모듈:
//! - `auth`: 인증 관련 (회원가입, 로그인, 토큰 갱신, 로그아웃, 내 정보)
//! - `extract`: 거부 시 `AppError`로 응답하는 `Json`/`Path`/`Query` 래퍼
//! - `favorites`: 내 즐겨찾기 포럼 조회
//! - `forums`: 포럼 CRUD, 모더레이터 지정, 즐겨찾기 추가, 이름 검색
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `posts`: 게시글 조회/작성/삭제

pub mod auth;
pub mod extract;
pub mod favorites;
pub mod forums;
pub mod health;
pub mod posts;

pub use favorites::*;
pub use forums::*;
pub use health::*;
pub use posts::*;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
}

/// API 라우터를 만듭니다. `main`은 이 라우터를 `/api/v1` 아래에 붙입니다.
///
/// 인증이 필요한 핸들러는 인자로 `AuthUser`를 받으므로,
/// 라우터 수준에서 별도의 인증 레이어를 두지 않습니다.
///
/// 경로 파라미터는 axum 0.8 문법인 `{id}`를 사용합니다.
/// `/forums/search` 같은 고정 경로는 `/forums/{id}`보다 우선 매칭됩니다.
pub fn api_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me));

    Router::new()
        .merge(auth_routes)
        // 게시글 API
        .route("/posts", get(list_posts).post(create_post).delete(delete_post))
        .route("/posts/{id}", get(get_post))
        // 포럼 API
        .route("/forums", get(list_forums).post(create_forum))
        .route("/forums/search", get(search_forums))
        .route("/forums/{id}", get(get_forum))
        .route("/forums/{id}/posts", get(list_forum_posts))
        .route("/forums/{id}/mods", get(list_moderators).post(promote_moderator))
        .route("/forums/{id}/favorite", post(add_favorite))
        // 내 즐겨찾기
        .route("/favorites", get(list_favorite_forums))
        .route("/favorites/ids", get(list_favorite_forum_ids))
        .route("/health", get(health_check))
        .with_state(state)
}
