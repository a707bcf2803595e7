//! 미디어 스토리지 서비스 모듈
//!
//! 아바타/커버 이미지를 외부 미디어 스토리지에 업로드하는
//! HTTP 클라이언트 서비스를 제공합니다.

pub mod media_service;

pub use media_service::*;
