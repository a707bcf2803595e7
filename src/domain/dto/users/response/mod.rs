//! 사용자 응답 DTO 모듈
//!
//! 민감 정보가 제거된 공개 사용자 정보와 세션 응답 데이터를 제공합니다.

pub mod user_response;

pub use user_response::{UserResponse, LoginData, TokenRefreshData};
