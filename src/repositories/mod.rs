//! # 리포지토리 모듈
//!
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리되는 리포지토리들을 제공합니다.
//! MongoDB 영구 저장과 Redis 캐싱을 담당하는 데이터 액세스 계층입니다.

pub mod users;
