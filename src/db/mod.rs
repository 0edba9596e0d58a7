//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 서비스(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `forums`: 포럼 CRUD, 모더레이터/즐겨찾기 관계, 이름 검색 쿼리
//! - `posts`: 게시글 조회/생성/삭제 쿼리
//! - `users`: 사용자 인증 관련 쿼리

pub mod forums;
pub mod posts;
pub mod users;

// 하위 모듈의 모든 공개 함수를 재공개(re-export)하여
// `crate::db::list_forums`처럼 바로 접근할 수 있게 합니다.
// (users는 `db::users::find_by_id`처럼 모듈 경로로 사용합니다)
pub use forums::*;
pub use posts::*;
