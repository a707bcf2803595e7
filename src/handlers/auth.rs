//! Authentication HTTP Handlers
//!
//! 로그인/로그아웃/세션 갱신 엔드포인트를 처리하는 핸들러 함수들입니다.
//!
//! # 세션 쿠키
//!
//! 세션은 `accessToken`, `refreshToken` 두 개의 쿠키로 표현됩니다.
//! 둘 다 HttpOnly + Secure로 설정되며, 쿠키를 사용할 수 없는 클라이언트를
//! 위해 동일한 토큰이 응답 본문에도 포함됩니다.
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::JwtConfig;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::users::request::auth_request::{LoginRequest, RefreshTokenRequest};
use crate::domain::dto::users::response::user_response::{LoginData, TokenRefreshData};
use crate::domain::models::token::token::TokenPair;
use crate::errors::errors::AppError;
use crate::services::users::user_service::UserService;

/// 로그인 핸들러
///
/// 사용자명 또는 이메일과 비밀번호로 인증하고,
/// 새 토큰 쌍을 쿠키와 응답 본문 양쪽으로 전달합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/login`
///
/// # Responses
///
/// * `200` - 공개 사용자 정보 + 토큰 쌍, 세션 쿠키 설정
/// * `400` - 사용자명/이메일 모두 누락
/// * `404` - 일치하는 사용자 없음
/// * `401` - 비밀번호 불일치
#[post("/login")]
pub async fn login_user(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user_service = UserService::instance();
    let (user, token_pair) = user_service.login_user(&payload).await?;

    let login_data = LoginData {
        user,
        access_token: token_pair.access_token.clone(),
        refresh_token: token_pair.refresh_token.clone(),
    };

    Ok(session_response(
        &token_pair,
        ApiResponse::new(200, login_data, "User logged In Successfully"),
    ))
}

/// 로그아웃 핸들러
///
/// 저장된 리프레시 토큰을 제거하고 세션 쿠키를 만료시킵니다.
/// 인증 미들웨어(`AuthMiddleware::required`)를 통과한 요청만 도달합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/logout`
#[post("/logout")]
pub async fn logout_user(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let user_service = UserService::instance();
    user_service.logout_user(&user.user_id).await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie("accessToken"))
        .cookie(removal_cookie("refreshToken"))
        .json(ApiResponse::new(200, serde_json::json!({}), "User logged Out")))
}

/// 세션 갱신 핸들러
///
/// 쿠키 또는 요청 본문의 리프레시 토큰을 검증하고
/// 새 토큰 쌍으로 회전시킵니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
///
/// # Responses
///
/// * `200` - 새 토큰 쌍, 세션 쿠키 갱신
/// * `401` - 토큰 없음/만료/변조/회전된 토큰 재사용 포함 모든 실패
#[post("/refresh")]
pub async fn refresh_access_token(
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    // 리프레시 토큰을 쿠키 또는 요청 본문에서 추출
    let incoming_token = extract_refresh_token(&req, body.as_deref())
        .ok_or_else(|| AppError::AuthenticationError("unauthorized request".to_string()))?;

    let user_service = UserService::instance();
    let token_pair = user_service.refresh_session(&incoming_token).await?;

    let refresh_data = TokenRefreshData {
        access_token: token_pair.access_token.clone(),
        refresh_token: token_pair.refresh_token.clone(),
    };

    Ok(session_response(
        &token_pair,
        ApiResponse::new(200, refresh_data, "Access token refreshed"),
    ))
}

/// 토큰 쌍을 세션 쿠키로 설정한 200 응답 생성
fn session_response<T: serde::Serialize>(
    token_pair: &TokenPair,
    body: ApiResponse<T>,
) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(session_cookie(
            "accessToken",
            token_pair.access_token.clone(),
            CookieDuration::hours(JwtConfig::access_expiration_hours()),
        ))
        .cookie(session_cookie(
            "refreshToken",
            token_pair.refresh_token.clone(),
            CookieDuration::days(JwtConfig::refresh_expiration_days()),
        ))
        .json(body)
}

/// HttpOnly + Secure 세션 쿠키 생성
fn session_cookie(name: &'static str, value: String, max_age: CookieDuration) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(max_age)
        .finish()
}

/// 세션 쿠키 제거용 만료 쿠키 생성
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// HTTP 요청에서 리프레시 토큰 추출
///
/// # 추출 우선순위
///
/// 1. `refreshToken` 쿠키
/// 2. 요청 본문의 `refreshToken` 필드
fn extract_refresh_token(
    req: &HttpRequest,
    body: Option<&RefreshTokenRequest>,
) -> Option<String> {
    // 1. 쿠키에서 리프레시 토큰 찾기
    if let Some(cookie) = req.cookie("refreshToken") {
        let token = cookie.value().trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    // 2. 요청 본문에서 리프레시 토큰 찾기
    body.and_then(|body| body.refresh_token.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("accessToken", "token-value".to_string(), CookieDuration::hours(1));

        assert_eq!(cookie.name(), "accessToken");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_removal_cookie_is_expired() {
        let cookie = removal_cookie("refreshToken");

        assert_eq!(cookie.name(), "refreshToken");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }

    #[test]
    fn test_extract_refresh_token_prefers_cookie() {
        let req = TestRequest::default()
            .cookie(Cookie::new("refreshToken", "cookie-token"))
            .to_http_request();

        let body = RefreshTokenRequest {
            refresh_token: Some("body-token".to_string()),
        };

        assert_eq!(
            extract_refresh_token(&req, Some(&body)),
            Some("cookie-token".to_string())
        );
    }

    #[test]
    fn test_extract_refresh_token_falls_back_to_body() {
        let req = TestRequest::default().to_http_request();

        let body = RefreshTokenRequest {
            refresh_token: Some("body-token".to_string()),
        };

        assert_eq!(
            extract_refresh_token(&req, Some(&body)),
            Some("body-token".to_string())
        );
    }

    #[test]
    fn test_extract_refresh_token_missing_everywhere() {
        let req = TestRequest::default().to_http_request();

        assert_eq!(extract_refresh_token(&req, None), None);
    }
}
