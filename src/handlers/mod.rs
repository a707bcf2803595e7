//! # HTTP 핸들러 모듈
//!
//! REST API 엔드포인트의 요청/응답 처리를 담당하는 핸들러 함수들을 제공합니다.
//!
//! ## 핸들러 계층의 책임
//!
//! 1. **입력 매핑/검증**: DTO 역직렬화, trim 기반 필수값 검증
//! 2. **서비스 위임**: 비즈니스 로직은 싱글톤 서비스에 위임
//! 3. **응답 구성**: `ApiResponse` 래핑, 세션 쿠키 설정/제거
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! 에러는 `ResponseError` 구현을 통해 표준 에러 본문으로 렌더링됩니다.
//!
//! ## 에러 처리 패턴
//!
//! ```rust,ignore
//! #[post("/login")]
//! pub async fn login_user(
//!     payload: web::Json<LoginRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()
//!         .map_err(|e| AppError::ValidationError(e.to_string()))?;
//!
//!     let user_service = UserService::instance();
//!     let (user, token_pair) = user_service.login_user(&payload).await?;
//!
//!     Ok(HttpResponse::Ok().json(/* ... */))
//! }
//! ```

pub mod users;
pub mod auth;
