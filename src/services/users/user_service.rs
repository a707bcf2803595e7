//! # 사용자 서비스 구현
//!
//! 계정 생명주기의 네 가지 연산(회원가입, 로그인, 로그아웃, 세션 갱신)을
//! 오케스트레이션하는 비즈니스 로직 계층입니다.
//!
//! ## 세션 상태 기계
//!
//! ```text
//! ANONYMOUS ─(login 성공)→ AUTHENTICATED[토큰=T1]
//!     ▲                          │
//!     │                          ├─(refresh 성공)→ AUTHENTICATED[토큰=T2]
//!     └────────(logout)──────────┘
//! ```
//!
//! 현재 유효한 토큰이 아닌 리프레시 토큰을 제시하는 갱신 요청은
//! 상태를 변경하지 않고 실패합니다.
//!
//! ## 원자성
//!
//! 각 연산은 호출자 관점에서 원자적입니다. 완전히 성공하여 하나의 응답을
//! 만들거나, 하나의 에러로 실패하며 명시적으로 커밋된 것 이상의
//! 부분 상태 변경을 남기지 않습니다. 응답은 저장소 쓰기가 완료된 후에만
//! 전송됩니다.

use std::sync::Arc;
use bcrypt::{hash, verify};
use singleton_macro::service;

use crate::config::PasswordConfig;
use crate::domain::dto::users::request::auth_request::LoginRequest;
use crate::domain::dto::users::request::register_request::RegisterUserData;
use crate::domain::dto::users::response::user_response::UserResponse;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::token::TokenPair;
use crate::errors::errors::AppError;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::token_service::TokenService;
use crate::services::media::media_service::MediaService;

/// 사용자 계정 및 세션 서비스
///
/// `#[service]` 매크로를 통해 자동으로 싱글톤으로 관리되며,
/// 리포지토리와 토큰/미디어 서비스가 자동으로 주입됩니다:
///
/// ```rust,ignore
/// let user_service = UserService::instance(); // 항상 동일한 인스턴스
/// ```
#[service(name = "user")]
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    ///
    /// 자동 의존성 주입을 통해 UserRepository 싱글톤이 주입됩니다.
    /// MongoDB 영구 저장과 Redis 캐싱을 지원합니다.
    user_repo: Arc<UserRepository>,

    /// JWT 토큰 발급/검증 서비스
    token_service: Arc<TokenService>,

    /// 미디어 스토리지 업로드 서비스
    media: Arc<MediaService>,
}

impl UserService {
    /// 새 사용자 계정 생성
    ///
    /// # 처리 과정
    ///
    /// 1. **중복 검사**: 사용자명/이메일 중 하나라도 기존 계정과 겹치면 거부
    /// 2. **아바타 필수 검증**: 아바타 파일이 없으면 거부
    /// 3. **미디어 업로드**: 아바타(필수), 커버 이미지(선택) 업로드
    /// 4. **비밀번호 해싱**: bcrypt, 환경별 cost 설정
    /// 5. **영구 저장**: 사용자명 소문자 정규화 후 저장
    /// 6. **정합성 확인**: 저장 직후 재조회로 생성 확인
    ///
    /// # 인자
    ///
    /// * `data` - trim 검증이 끝난 회원가입 데이터
    ///
    /// # 반환값
    ///
    /// * `Ok(UserResponse)` - 생성된 사용자의 공개 프로젝션
    /// * `Err(AppError::ConflictError)` - 이메일 또는 사용자명 중복
    /// * `Err(AppError::ValidationError)` - 필수 아바타 파일 누락
    /// * `Err(AppError::UploadError)` - 필수 아바타 업로드 실패
    /// * `Err(AppError::InternalError)` - 해싱 실패 또는 생성 후 조회 실패
    ///
    /// # 비즈니스 규칙
    ///
    /// - 커버 이미지 업로드 실패는 가입을 막지 않습니다 (URL 없이 저장)
    /// - 응답에는 비밀번호 해시와 리프레시 토큰이 절대 포함되지 않습니다
    pub async fn register_user(&self, data: RegisterUserData) -> Result<UserResponse, AppError> {
        let start_time = std::time::Instant::now();

        // 중복 검사 - 업로드 비용을 치르기 전에 먼저 확인
        if self
            .user_repo
            .find_by_username_or_email(Some(&data.username), Some(&data.email))
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError(
                "User with email or username already exists".to_string(),
            ));
        }

        // 아바타 파일 필수 검증
        let avatar = data.avatar.as_ref().ok_or_else(|| {
            AppError::ValidationError("Avatar file is required".to_string())
        })?;

        // 아바타 업로드 (필수)
        let avatar_url = self
            .media
            .upload_image(avatar)
            .await
            .map_err(|e| AppError::UploadError(format!("Avatar upload failed: {}", e)))?;

        // 커버 이미지 업로드 (선택) - 실패해도 가입은 진행
        let cover_image_url = match &data.cover_image {
            Some(file) => match self.media.upload_image(file).await {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("커버 이미지 업로드 실패 (무시됨) - 사용자: {}, 에러: {}", data.username, e);
                    None
                }
            },
            None => None,
        };

        // 환경별 bcrypt cost 사용
        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        // 비밀번호 해싱
        let hash_start = std::time::Instant::now();
        let password_hash = hash(&data.password, bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;
        log::info!("Password hashing took: {:?}", hash_start.elapsed());

        // 사용자 엔티티 생성 (사용자명 소문자 정규화 포함)
        let user = User::new(
            data.fullname,
            data.email,
            data.username,
            password_hash,
            avatar_url,
            cover_image_url,
        );

        // 저장
        let created_user = self.user_repo.create(user).await?;

        // 생성 후 재조회 - 영속 상태 정합성 확인
        let user_id = created_user.id_string().ok_or_else(|| {
            AppError::InternalError("Something went wrong while registering the user".to_string())
        })?;

        let persisted = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Something went wrong while registering the user".to_string())
            })?;

        log::info!("Total user registration took: {:?}", start_time.elapsed());

        Ok(UserResponse::from(persisted))
    }

    /// 로그인 처리
    ///
    /// 자격 증명을 검증하고 새 토큰 쌍을 발급하며,
    /// 리프레시 토큰을 사용자 문서에 기록합니다.
    ///
    /// # 처리 과정
    ///
    /// 1. 사용자명 또는 이메일로 사용자 조회
    /// 2. bcrypt 해시 비교로 비밀번호 검증
    /// 3. 토큰 쌍 발급
    /// 4. 리프레시 토큰 영속화 (단일 필드 `$set`)
    ///
    /// 응답은 영속화가 완료된 후에만 반환됩니다.
    ///
    /// # 반환값
    ///
    /// * `Ok((UserResponse, TokenPair))` - 공개 사용자 정보와 토큰 쌍
    /// * `Err(AppError::ValidationError)` - 사용자명/이메일 모두 없음
    /// * `Err(AppError::NotFound)` - 일치하는 사용자 없음
    /// * `Err(AppError::AuthenticationError)` - 비밀번호 불일치
    pub async fn login_user(&self, request: &LoginRequest) -> Result<(UserResponse, TokenPair), AppError> {
        if !request.has_identifier() {
            return Err(AppError::ValidationError(
                "username or email is required".to_string(),
            ));
        }

        // 사용자 조회
        let user = self
            .user_repo
            .find_by_username_or_email(request.username.as_deref(), request.email.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        // 비밀번호 검증
        let password_valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

        if !password_valid {
            log::warn!("로그인 실패 - 비밀번호 불일치: {}", user.username);
            return Err(AppError::AuthenticationError(
                "Invalid user credentials".to_string(),
            ));
        }

        let user_id = user.id_string().ok_or_else(|| {
            AppError::InternalError("User record is missing an id".to_string())
        })?;

        // 토큰 쌍 발급
        let token_pair = self.token_service.generate_token_pair(&user_id)?;

        // 리프레시 토큰 영속화 - 완료 전에는 응답하지 않음
        let updated_user = self
            .user_repo
            .set_refresh_token(&user_id, &token_pair.refresh_token)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Failed to persist refresh token".to_string())
            })?;

        log::info!("로그인 성공 - 사용자: {}, ID: {}", updated_user.username, user_id);

        Ok((UserResponse::from(updated_user), token_pair))
    }

    /// ID로 사용자 조회
    ///
    /// 사용자를 조회하여 공개 프로젝션으로 변환합니다.
    /// Repository 레이어의 Redis 캐싱을 활용합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(UserResponse)` - 사용자 정보 DTO (민감 정보 제외)
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn get_user_by_id(&self, id: &str) -> Result<UserResponse, AppError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 로그아웃 처리
    ///
    /// 저장된 리프레시 토큰을 제거하여 세션을 서버 측에서 종료합니다.
    /// 인증된 호출자라는 전제 하에 항상 성공하며,
    /// 저장소 오류만 `InternalError`로 전파됩니다.
    pub async fn logout_user(&self, user_id: &str) -> Result<(), AppError> {
        self.user_repo
            .clear_refresh_token(user_id)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        log::info!("로그아웃 완료 - 사용자 ID: {}", user_id);

        Ok(())
    }

    /// 세션 갱신 (리프레시 토큰 회전)
    ///
    /// 제시된 리프레시 토큰을 검증하고 새 토큰 쌍으로 교체합니다.
    ///
    /// # 처리 과정
    ///
    /// 1. 서명/만료 검증 (리프레시 비밀키)
    /// 2. 클레임의 사용자 조회
    /// 3. 저장된 토큰과 정확한 값 비교 - 회전 강제 검사
    /// 4. 새 토큰 쌍 발급 후 compare-and-swap으로 영속화
    ///
    /// # 에러 평탄화
    ///
    /// 이 흐름에서 발생하는 모든 실패(서명 비밀키 불일치 등 내부 오류 포함)는
    /// 일관되게 `AuthenticationError`로 변환됩니다. 내부 장애와
    /// 클라이언트의 잘못된 토큰이 응답에서 구분되지 않도록 하기 위함입니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(TokenPair)` - 새로 발급된 토큰 쌍
    /// * `Err(AppError::AuthenticationError)` - 그 외 모든 실패
    pub async fn refresh_session(&self, incoming_token: &str) -> Result<TokenPair, AppError> {
        match self.try_refresh(incoming_token).await {
            Ok(pair) => Ok(pair),
            Err(e) => {
                log::warn!("세션 갱신 실패: {}", e);
                Err(AppError::AuthenticationError(e.to_string()))
            }
        }
    }

    /// 세션 갱신의 실제 시퀀스
    ///
    /// 에러 종류는 보존한 채로 반환하고, 공개 메서드에서 일괄 변환합니다.
    async fn try_refresh(&self, incoming_token: &str) -> Result<TokenPair, AppError> {
        // 1. 서명/만료 검증
        let claims = self.token_service.verify_refresh_token(incoming_token)?;

        // 2. 사용자 조회
        let user = self
            .user_repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("Invalid refresh token".to_string()))?;

        // 3. 저장된 토큰과 정확한 값 비교 (회전된 이전 토큰 거부)
        if !user.refresh_token_matches(incoming_token) {
            return Err(AppError::AuthenticationError(
                "Refresh token is expired or used".to_string(),
            ));
        }

        // 4. 새 토큰 쌍 발급 및 compare-and-swap 회전
        let token_pair = self.token_service.generate_token_pair(&claims.sub)?;

        let rotated = self
            .user_repo
            .rotate_refresh_token(&claims.sub, incoming_token, &token_pair.refresh_token)
            .await?;

        // CAS 실패: 같은 토큰을 든 동시 요청이 먼저 회전을 끝낸 경우
        if rotated.is_none() {
            return Err(AppError::AuthenticationError(
                "Refresh token is expired or used".to_string(),
            ));
        }

        log::info!("세션 갱신 성공 - 사용자 ID: {}", claims.sub);

        Ok(token_pair)
    }
}
