//! 사용자 요청 DTO 모듈
//!
//! 클라이언트 입력 데이터의 타입 안전한 매핑과 검증을 담당합니다.

pub mod register_request;
pub mod auth_request;

pub use register_request::*;
pub use auth_request::*;
