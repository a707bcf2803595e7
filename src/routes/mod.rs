//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 계정/세션 관련 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Features
//!
//! - 회원가입/로그인/로그아웃/세션 갱신 API 엔드포인트
//! - 보호 라우트에 대한 인증 미들웨어 적용
//! - 헬스체크 엔드포인트
//!
//! # Auth Middleware Usage
//!
//! 라우트에 따라 다른 인증 레벨을 적용할 수 있습니다:
//!
//! ## 인증 불필요 (Public 라우트)
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/auth")
//!         .service(handlers::users::register_user) // 회원가입은 인증 불필요
//!         .service(handlers::auth::login_user)     // 로그인 자체는 인증 불필요
//! );
//! ```
//!
//! ## 인증 필요
//! ```rust,ignore
//! web::scope("")
//!     .wrap(AuthMiddleware::required())
//!     .service(handlers::auth::logout_user) // 유효한 액세스 토큰 필요
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
}

/// 계정/세션 관련 라우트를 설정합니다
///
/// # Route Groups
///
/// ## Public 라우트 (인증 불필요)
/// - `POST /api/v1/auth/register` - 회원가입 (멀티파트: 계정 정보 + 이미지)
/// - `POST /api/v1/auth/login` - 사용자명/이메일 + 비밀번호 로그인
/// - `POST /api/v1/auth/refresh` - 리프레시 토큰으로 세션 갱신
///
/// ## Protected 라우트 (유효한 액세스 토큰 필요)
/// - `POST /api/v1/auth/logout` - 로그아웃 (서버 측 세션 종료)
/// - `GET /api/v1/auth/me` - 현재 사용자 정보 조회
///
/// 보호 라우트는 스코프 내부의 빈 프리픽스 스코프에 미들웨어를 감싸
/// 공개 라우트 뒤에 배치합니다.
///
/// # Examples
///
/// ```bash
/// # 로그인
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"username":"ab","password":"password123"}'
///
/// # 세션 갱신 (쿠키 사용)
/// curl -X POST http://localhost:8080/api/v1/auth/refresh \
///   --cookie "refreshToken=eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // Public 라우트
            .service(handlers::users::register_user)
            .service(handlers::auth::login_user)
            .service(handlers::auth::refresh_access_token)
            // Protected 라우트
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::auth::logout_user)
                    .service(handlers::users::current_user)
            )
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "viewtube_backend",
///   "version": "0.1.0",
///   "timestamp": "2025-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "cache": "Redis",
///     "dependency_injection": "Singleton Macro"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "viewtube_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
