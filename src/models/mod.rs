//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `forum`: 포럼(Forum)과 모더레이터/즐겨찾기 요청 구조체
//! - `post`: 게시글(Post) 관련 구조체
//! - `user`: 사용자(User), 권한(Role), 인증 요청/응답 구조체
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Forum`처럼 짧게 접근할 수 있습니다.

pub mod forum;
pub mod post;
pub mod user;

pub use forum::*;
pub use post::*;
pub use user::*;
