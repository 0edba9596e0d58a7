//! # 요청 추출자(Extractor) 래퍼
//!
//! axum 기본 `Json`/`Path`/`Query`는 입력이 잘못되면 `text/plain` 거부 응답을
//! 그대로 돌려줍니다. 여기의 래퍼는 같은 추출을 하되 거부를 `AppError`로 바꿔서
//! 모든 에러 응답이 `{ "error": { "code", "message" } }` 형태가 되게 합니다.
//!
//! 변환 규칙은 `error.rs`의 `From<...Rejection> for AppError` 구현에 있습니다.
//! - JSON 필드 타입/누락 → 422 `validation_error`
//! - 그 밖의 잘못된 JSON, 경로, 쿼리 → 400 `bad_request`
//!
//! 응답 쪽에서는 계속 `axum::Json`을 씁니다.

use crate::error::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// 요청 본문 JSON
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 경로 파라미터 (`/forums/{id}`)
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// 쿼리 문자열 (`?q=...`)
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
