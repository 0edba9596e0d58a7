//! # 서비스(비즈니스 로직) 계층
//!
//! 단순한 DAO 호출 이상이 필요한 작업을 담당합니다.
//! - 권한 확인 (게시글 삭제, 모더레이터 지정)
//! - 참조 검증 (존재하지 않는 포럼/사용자를 가리키는 요청 거부)
//! - 여러 쿼리를 하나의 트랜잭션으로 묶는 쓰기 작업
//!
//! 라우트 핸들러는 인증된 호출자(`AuthUser`)를 그대로 넘기고,
//! 서비스는 `AppError`(403/404/409/422 등)로 결과를 돌려줍니다.

pub mod forums;
pub mod posts;
