//! # Authentication Configuration Module
//!
//! JWT 토큰과 미디어 스토리지 등 인증/세션 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export ACCESS_TOKEN_SECRET="your-access-token-secret"
//! export ACCESS_TOKEN_EXPIRY_HOURS="1"
//! export REFRESH_TOKEN_SECRET="your-refresh-token-secret"
//! export REFRESH_TOKEN_EXPIRY_DAYS="10"
//! ```
//!
//! ### 미디어 스토리지 설정
//! ```bash
//! export MEDIA_CLOUD_NAME="your-cloud-name"
//! export MEDIA_API_KEY="your-api-key"
//! export MEDIA_API_SECRET="your-api-secret"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtConfig, MediaStorageConfig};
//!
//! // JWT 토큰 생성 설정
//! let secret = JwtConfig::access_secret();
//! let expiration = JwtConfig::access_expiration_hours();
//!
//! // 미디어 업로드 엔드포인트 구성
//! let url = format!("{}/{}/image/upload",
//!     MediaStorageConfig::upload_base_url(),
//!     MediaStorageConfig::cloud_name());
//! ```

use std::env;

/// JWT 토큰 설정을 관리하는 구조체
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키와 수명을 사용합니다.
/// 액세스 토큰은 짧게, 리프레시 토큰은 길게 유지하여
/// 토큰 탈취 시의 피해 범위를 제한합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// 액세스 토큰 서명에 사용할 비밀키를 반환합니다.
    ///
    /// # 보안 요구사항
    ///
    /// - 최소 256비트 (32바이트) 길이
    /// - 암호학적으로 안전한 랜덤 생성
    /// - 리프레시 토큰 비밀키와 반드시 다른 값 사용
    ///
    /// # 기본값
    ///
    /// 환경 변수가 설정되지 않은 경우 "access-token-secret"을 사용하지만,
    /// 이는 개발 환경에서만 안전하며 경고 로그가 출력됩니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn access_secret() -> String {
        env::var("ACCESS_TOKEN_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("ACCESS_TOKEN_SECRET not set, using default (not secure for production!)");
                "access-token-secret".to_string()
            })
    }

    /// 리프레시 토큰 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 액세스 토큰과 비밀키를 분리하여, 액세스 토큰을
    /// 리프레시 엔드포인트에 제시하는 방식의 혼용을 차단합니다.
    pub fn refresh_secret() -> String {
        env::var("REFRESH_TOKEN_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("REFRESH_TOKEN_SECRET not set, using default (not secure for production!)");
                "refresh-token-secret".to_string()
            })
    }

    /// 액세스 토큰의 만료 시간을 시간 단위로 반환합니다.
    ///
    /// # 권장 설정값
    ///
    /// - **개발**: 24시간 (편의성 우선)
    /// - **프로덕션**: 1시간 이하 (보안 우선)
    ///
    /// # 기본값
    ///
    /// 1시간
    ///
    /// # 환경 변수 설정
    ///
    /// ```bash
    /// export ACCESS_TOKEN_EXPIRY_HOURS="1"
    /// ```
    pub fn access_expiration_hours() -> i64 {
        env::var("ACCESS_TOKEN_EXPIRY_HOURS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .unwrap_or(1)
    }

    /// 리프레시 토큰의 만료 시간을 일 단위로 반환합니다.
    ///
    /// 리프레시 토큰은 액세스 토큰을 갱신하는 데 사용되므로,
    /// 액세스 토큰보다 훨씬 긴 유효 기간을 가져야 합니다.
    ///
    /// # 기본값
    ///
    /// 10일
    ///
    /// # 보안 고려사항
    ///
    /// - 리프레시 토큰은 사용될 때마다 회전(rotation)됩니다
    /// - 서버에 저장된 값과 정확히 일치해야만 수락됩니다
    pub fn refresh_expiration_days() -> i64 {
        env::var("REFRESH_TOKEN_EXPIRY_DAYS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}

/// 미디어 스토리지 설정을 관리하는 구조체
///
/// 아바타/커버 이미지가 업로드되는 외부 미디어 스토리지의
/// 자격 증명과 엔드포인트를 관리합니다.
///
/// ## 보안 고려사항
///
/// - `api_secret`은 절대 클라이언트 사이드에 노출되어서는 안 됩니다
/// - 업로드 요청은 서버에서 서명한 후 전송됩니다
pub struct MediaStorageConfig;

impl MediaStorageConfig {
    /// 미디어 스토리지 클라우드 이름을 반환합니다.
    ///
    /// # Panics
    ///
    /// `MEDIA_CLOUD_NAME` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn cloud_name() -> String {
        env::var("MEDIA_CLOUD_NAME")
            .expect("MEDIA_CLOUD_NAME must be set")
    }

    /// 미디어 스토리지 API 키를 반환합니다.
    ///
    /// # Panics
    ///
    /// `MEDIA_API_KEY` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn api_key() -> String {
        env::var("MEDIA_API_KEY")
            .expect("MEDIA_API_KEY must be set")
    }

    /// 미디어 스토리지 API 비밀키를 반환합니다.
    ///
    /// 업로드 요청 서명에만 사용되며, 이 값을 로그에 출력하지 마세요.
    ///
    /// # Panics
    ///
    /// `MEDIA_API_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn api_secret() -> String {
        env::var("MEDIA_API_SECRET")
            .expect("MEDIA_API_SECRET must be set")
    }

    /// 미디어 업로드 API의 기본 URL을 반환합니다.
    ///
    /// 일반적으로 변경할 필요가 없으므로 기본값을 제공합니다.
    ///
    /// # 기본값
    ///
    /// `https://api.cloudinary.com/v1_1`
    pub fn upload_base_url() -> String {
        env::var("MEDIA_UPLOAD_BASE_URL")
            .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_expiry_defaults() {
        if env::var("ACCESS_TOKEN_EXPIRY_HOURS").is_err() {
            assert_eq!(JwtConfig::access_expiration_hours(), 1);
        }

        if env::var("REFRESH_TOKEN_EXPIRY_DAYS").is_err() {
            assert_eq!(JwtConfig::refresh_expiration_days(), 10);
        }
    }

    #[test]
    fn test_upload_base_url_default() {
        if env::var("MEDIA_UPLOAD_BASE_URL").is_err() {
            assert_eq!(
                MediaStorageConfig::upload_base_url(),
                "https://api.cloudinary.com/v1_1"
            );
        }
    }
}
