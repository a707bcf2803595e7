//! # Core Framework Module
//!
//! 백엔드 서비스를 위한 핵심 프레임워크 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 전역 싱글톤 컨테이너
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 서비스 등록
//! - **싱글톤 관리**: Thread-safe한 인스턴스 생명주기 관리
//! - **의존성 해결**: `Arc<T>` 타입 기반 자동 의존성 주입
//!
//! ## 사용 패턴
//!
//! ### 기본 서비스 정의
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! // 리포지토리 정의
//! #[repository(name = "user", collection = "users")]
//! struct UserRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! // 서비스 정의 (자동 의존성 주입)
//! #[service(name = "user")]
//! struct UserService {
//!     user_repo: Arc<UserRepository>,    // 자동 주입
//!     token_service: Arc<TokenService>,  // 자동 주입
//! }
//!
//! // 사용
//! let user_service = UserService::instance();
//! ```
//!
//! ### 애플리케이션 초기화
//!
//! ```rust,ignore
//! use crate::core::registry::ServiceLocator;
//!
//! // 1. 인프라 컴포넌트 등록
//! ServiceLocator::set(database);
//! ServiceLocator::set(redis_client);
//!
//! // 2. 모든 서비스/리포지토리 초기화
//! ServiceLocator::initialize_all().await?;
//! ```

pub mod registry;

pub use registry::*;
