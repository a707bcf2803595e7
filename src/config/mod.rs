//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경 관련 설정
//! - [`auth_config`] - JWT 토큰, 미디어 스토리지 관련 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 설정값을 제공합니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - 프로덕션에서는 필수 설정값 누락 시 패닉
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # JWT 토큰 설정
//! export ACCESS_TOKEN_SECRET="your-access-token-secret"
//! export ACCESS_TOKEN_EXPIRY_HOURS="1"
//! export REFRESH_TOKEN_SECRET="your-refresh-token-secret"
//! export REFRESH_TOKEN_EXPIRY_DAYS="10"
//!
//! # 미디어 스토리지 설정
//! export MEDIA_CLOUD_NAME="your-cloud-name"
//! export MEDIA_API_KEY="your-api-key"
//! export MEDIA_API_SECRET="your-api-secret"
//!
//! # 보안 설정
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
