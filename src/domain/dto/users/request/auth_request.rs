//! 인증 요청관련 DTO
//!
//! 로그인/세션 갱신을 요청하는 사용자들의 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// 로그인 요청 구조체
///
/// `username`과 `email` 중 적어도 하나는 제공되어야 하며,
/// 빈 문자열/공백 입력은 역직렬화 단계에서 None으로 정리됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// 사용자명/이메일 중 하나 이상이 제공되었는지 확인
    pub fn has_identifier(&self) -> bool {
        self.username.is_some() || self.email.is_some()
    }
}

/// 리프레시 토큰 요청 구조체
///
/// 쿠키가 없는 클라이언트는 요청 본문으로 토큰을 전달할 수 있습니다.
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken", default, deserialize_with = "deserialize_optional_string")]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_blank_identifiers_become_none() {
        let json = r#"{"username": "   ", "email": "", "password": "pw"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.username, None);
        assert_eq!(request.email, None);
        assert!(!request.has_identifier());
    }

    #[test]
    fn test_login_request_trims_identifier() {
        let json = r#"{"username": "  ab  ", "password": "pw"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.username, Some("ab".to_string()));
        assert!(request.has_identifier());
    }

    #[test]
    fn test_login_request_empty_password_fails_validation() {
        let json = r#"{"username": "ab", "password": ""}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_refresh_token_request_body_key() {
        let json = r#"{"refreshToken": "some-token"}"#;
        let request: RefreshTokenRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.refresh_token, Some("some-token".to_string()));
    }

    #[test]
    fn test_refresh_token_request_missing_field() {
        let json = r#"{}"#;
        let request: RefreshTokenRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.refresh_token, None);
    }
}
