//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 세션 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.
//!
//! 두 토큰은 서로 다른 비밀키로 서명되므로, 액세스 토큰을
//! 리프레시 검증기에 제시하는 방식의 혼용은 서명 단계에서 거부됩니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::config::JwtConfig;
use crate::domain::models::token::token::{TokenClaims, TokenPair};
use crate::errors::errors::AppError;

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 안전한 JWT 토큰을 생성하고 검증합니다.
/// 영속성이 없는 순수 서명/검증 계층입니다.
#[service(name="token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `user_id` - 토큰을 발급받을 사용자 ID
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 생성된 JWT 액세스 토큰
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_service = TokenService::instance();
    /// let access_token = token_service.issue_access_token(&user_id)?;
    /// ```
    pub fn issue_access_token(&self, user_id: &str) -> Result<String, AppError> {
        let lifetime = Duration::hours(JwtConfig::access_expiration_hours());
        Self::issue(user_id, &JwtConfig::access_secret(), lifetime)
    }

    /// 사용자를 위한 리프레시 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `user_id` - 토큰을 발급받을 사용자 ID
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 생성된 JWT 리프레시 토큰
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    ///
    /// # Security
    ///
    /// 리프레시 토큰은 Secure HttpOnly Cookie에 저장되며,
    /// 발급 직후 사용자 문서의 `current_refresh_token`으로 기록됩니다.
    pub fn issue_refresh_token(&self, user_id: &str) -> Result<String, AppError> {
        let lifetime = Duration::days(JwtConfig::refresh_expiration_days());
        Self::issue(user_id, &JwtConfig::refresh_secret(), lifetime)
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_pair = token_service.generate_token_pair(&user_id)?;
    /// println!("Access token: {}", token_pair.access_token);
    /// ```
    pub fn generate_token_pair(&self, user_id: &str) -> Result<TokenPair, AppError> {
        let access_token = self.issue_access_token(user_id)?;
        let refresh_token = self.issue_refresh_token(user_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// 액세스 토큰 검증 및 클레임 추출
    ///
    /// # Arguments
    ///
    /// * `token` - 검증할 JWT 토큰 문자열 (Bearer 접두사 제외)
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    /// * `AppError::InternalError` - 기타 시스템 오류
    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        Self::verify(token, &JwtConfig::access_secret())
    }

    /// 리프레시 토큰 검증 및 클레임 추출
    ///
    /// 서명/만료 검증만 수행합니다. 저장된 토큰과의 일치 비교는
    /// 세션 갱신 흐름에서 별도로 수행됩니다.
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        Self::verify(token, &JwtConfig::refresh_secret())
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        if auth_header.starts_with("Bearer ") {
            Ok(&auth_header[7..])
        } else {
            Err(AppError::AuthenticationError("Invalid authorization header format".to_string()))
        }
    }

    /// 주어진 비밀키와 수명으로 토큰 서명
    fn issue(user_id: &str, secret: &str, lifetime: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + lifetime;

        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("Token signing failed: {}", e)))
    }

    /// 주어진 비밀키로 토큰 검증
    fn verify(token: &str, secret: &str) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token has expired".to_string())
                },
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::AuthenticationError("Invalid token".to_string())
                },
                _ => AppError::AuthenticationError(format!("Token verification failed: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_ID: &str = "507f1f77bcf86cd799439011";

    fn set_test_secrets() {
        // SAFETY: 테스트 전용. 모든 테스트가 동일한 값을 기록하므로
        // 병렬 실행 중에도 관측되는 값은 항상 같습니다.
        unsafe {
            std::env::set_var("ACCESS_TOKEN_SECRET", "test-access-secret");
            std::env::set_var("REFRESH_TOKEN_SECRET", "test-refresh-secret");
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        set_test_secrets();
        let token_service = TokenService::instance();

        let token = token_service.issue_access_token(USER_ID).unwrap();
        let claims = token_service.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, USER_ID);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        set_test_secrets();
        let token_service = TokenService::instance();

        let token = token_service.issue_refresh_token(USER_ID).unwrap();
        let claims = token_service.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.sub, USER_ID);
    }

    #[test]
    fn test_token_pair_contains_distinct_tokens() {
        set_test_secrets();
        let token_service = TokenService::instance();

        let pair = token_service.generate_token_pair(USER_ID).unwrap();

        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_access_token_rejected_by_refresh_verifier() {
        set_test_secrets();
        let token_service = TokenService::instance();

        let access_token = token_service.issue_access_token(USER_ID).unwrap();
        let result = token_service.verify_refresh_token(&access_token);

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_tampered_token_fails_verification() {
        set_test_secrets();
        let token_service = TokenService::instance();

        let token = token_service.issue_access_token(USER_ID).unwrap();

        // 서명 부분의 마지막 문자를 교체하여 변조
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'a' { 'b' } else { 'a' });

        let result = token_service.verify_access_token(&tampered);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_fails_verification() {
        set_test_secrets();
        let token_service = TokenService::instance();

        // 1시간 전에 만료된 토큰을 직접 서명
        let now = Utc::now();
        let claims = TokenClaims {
            sub: USER_ID.to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(JwtConfig::access_secret().as_ref()),
        )
        .unwrap();

        let result = token_service.verify_access_token(&expired);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        set_test_secrets();
        let token_service = TokenService::instance();

        assert_eq!(
            token_service.extract_bearer_token("Bearer abc.def.ghi").unwrap(),
            "abc.def.ghi"
        );
        assert!(token_service.extract_bearer_token("Basic abc").is_err());
        assert!(token_service.extract_bearer_token("abc.def.ghi").is_err());
    }
}
