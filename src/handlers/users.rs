//! User HTTP Handlers
//!
//! 회원가입과 사용자 조회 엔드포인트를 처리하는 핸들러 함수들입니다.

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{get, post, HttpResponse};

use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::users::request::register_request::{
    validate_username, FileUpload, RegisterUserData, RegisterUserForm,
};
use crate::errors::errors::AppError;
use crate::services::users::user_service::UserService;
use crate::utils::string_utils::validate_required_string;

/// 회원가입 핸들러
///
/// 멀티파트 폼으로 계정 정보와 프로필 이미지를 수신합니다.
/// 아바타는 필수, 커버 이미지는 선택입니다.
///
/// # Endpoint
/// `POST /api/v1/auth/register`
///
/// # Responses
///
/// * `201` - 생성된 사용자의 공개 프로젝션
/// * `400` - 필수 필드 누락/빈 값, 아바타 없음, 아바타 업로드 실패
/// * `409` - 사용자명 또는 이메일 중복
#[post("/register")]
pub async fn register_user(
    MultipartForm(form): MultipartForm<RegisterUserForm>,
) -> Result<HttpResponse, AppError> {
    // trim 기반 필수값 검증 - 필드 누락과 공백만 있는 입력을 모두 거부
    let fullname = required_text(&form.fullname, "fullname")?;
    let email = required_text(&form.email, "email")?;
    let username = required_text(&form.username, "username")?;
    let password = required_text(&form.password, "password")?;

    validate_username(&username)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    // 파일 필드 읽기 - 필수 여부 판정은 서비스 계층에서 수행
    let avatar = match form.avatar.as_ref().filter(|file| file.size > 0) {
        Some(file) => Some(read_upload(file)?),
        None => None,
    };

    let cover_image = match form.cover_image.as_ref().filter(|file| file.size > 0) {
        Some(file) => Some(read_upload(file)?),
        None => None,
    };

    log::info!("회원가입 요청 - 사용자명: {}, 이메일: {}", username, email);

    let user_service = UserService::instance();
    let created = user_service
        .register_user(RegisterUserData {
            fullname,
            email,
            username,
            password,
            avatar,
            cover_image,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::new(
        201,
        created,
        "User registered Successfully",
    )))
}

/// 현재 인증된 사용자 정보 조회 핸들러
///
/// 인증 미들웨어가 첨부한 사용자 ID로 최신 사용자 정보를 조회합니다.
///
/// # Endpoint
/// `GET /api/v1/auth/me`
#[get("/me")]
pub async fn current_user(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let user_service = UserService::instance();
    let found = user_service.get_user_by_id(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        200,
        found,
        "Current user fetched Successfully",
    )))
}

/// 선택적 텍스트 필드에 필수값 검증 적용
///
/// 필드가 아예 없는 경우도 빈 값과 동일하게 처리합니다.
fn required_text(field: &Option<Text<String>>, field_name: &str) -> Result<String, AppError> {
    let value = field.as_deref().map(String::as_str).unwrap_or("");
    validate_required_string(value, field_name)
}

/// 멀티파트 임시 파일을 메모리 표현으로 변환
fn read_upload(file: &TempFile) -> Result<FileUpload, AppError> {
    let bytes = std::fs::read(file.file.path())
        .map_err(|e| AppError::InternalError(format!("Failed to read uploaded file: {}", e)))?;

    let filename = file.file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());

    Ok(FileUpload { bytes, filename })
}
