//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **자동 의존성 주입**: 싱글톤 매크로를 통한 DI
//! - **데이터 무결성**: 유니크 제약 조건 및 인덱스 관리
//! - **토큰 회전 지원**: 리프레시 토큰 교체를 위한 원자적 compare-and-swap

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, Bson, DateTime}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
};
use singleton_macro::repository;
use crate::errors::errors::AppError;

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 엔티티의 조회/생성과 리프레시 토큰 갱신 연산을 담당하며,
/// MongoDB 컬렉션과 Redis 캐시를 통합하여 최적화된 데이터 액세스를 제공합니다.
///
/// ## 캐싱 전략
///
/// - **캐시 키**: `user:{user_id}`, TTL 10분
/// - **ID 조회만 캐싱**: 인증 미들웨어와 세션 갱신이 가장 빈번하게 사용
/// - **쓰기 후 무효화**: 리프레시 토큰을 변경하는 모든 연산은 캐시를 무효화.
///   저장된 토큰과의 정확한 일치 비교가 세션 유효성의 기준이므로,
///   무효화가 누락되면 회전된 토큰이 캐시에서 되살아날 수 있습니다.
///
/// ## 에러 처리
///
/// 모든 메서드는 `Result<T, AppError>` 타입을 반환합니다:
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ValidationError**: 잘못된 ObjectId 형식 등 입력값 검증 오류
/// - **ConflictError**: 이메일/사용자명 중복 등 비즈니스 규칙 위반
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    ///
    /// 자동 주입되는 데이터베이스 컴포넌트입니다.
    /// `users` 컬렉션에 대한 모든 MongoDB 연산을 담당합니다.
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    ///
    /// 자동 주입되는 Redis 클라이언트입니다.
    /// 조회 성능 향상을 위한 캐싱 레이어를 제공합니다.
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// ID로 사용자 조회
    ///
    /// MongoDB ObjectId를 사용하여 사용자를 조회합니다.
    /// 가장 빈번한 조회 패턴이므로 캐싱을 적용합니다.
    ///
    /// # 인자
    ///
    /// * `id` - MongoDB ObjectId의 16진수 문자열 표현
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid user id format".to_string()))?;

        let cache_key = self.cache_key(id);

        // 캐시 확인
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        // DB 조회
        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 저장 (10분)
        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 사용자명 또는 이메일로 사용자 조회
    ///
    /// 두 식별자 중 제공된 것들로 `$or` 조회를 수행합니다.
    /// 사용자명은 저장 시 소문자로 정규화되므로 조회 전에 소문자로 변환합니다.
    ///
    /// 로그인 조회와 회원가입 중복 검사가 공유하는 단일 진입점입니다.
    ///
    /// # 인자
    ///
    /// * `username` - 조회할 사용자명 (선택)
    /// * `email` - 조회할 이메일 (선택)
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 둘 중 하나라도 일치하는 사용자가 있는 경우
    /// * `Ok(None)` - 일치하는 사용자가 없거나 식별자가 모두 없는 경우
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let mut conditions: Vec<Bson> = Vec::new();

        if let Some(username) = username {
            conditions.push(Bson::Document(doc! { "username": username.to_lowercase() }));
        }
        if let Some(email) = email {
            conditions.push(Bson::Document(doc! { "email": email }));
        }

        if conditions.is_empty() {
            return Ok(None);
        }

        self.collection::<User>()
            .find_one(doc! { "$or": conditions })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// 새로운 사용자를 데이터베이스에 저장합니다.
    /// 이메일과 사용자명의 중복 여부를 저장 직전에 다시 검증합니다.
    /// 서비스 계층의 사전 검사와 미디어 업로드 사이의 시간 동안
    /// 동일 식별자로 가입이 완료되었을 수 있기 때문입니다.
    ///
    /// # 인자
    ///
    /// * `user` - 생성할 사용자 정보 (ID는 자동 할당됨)
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 이메일 또는 사용자명 중복
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인
        if self
            .find_by_username_or_email(Some(&user.username), Some(&user.email))
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError(
                "User with email or username already exists".to_string(),
            ));
        }

        // DB에 저장
        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();

        // 컬렉션 캐시 무효화
        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 리프레시 토큰 저장 (로그인)
    ///
    /// 로그인 성공 시 새로 발급된 리프레시 토큰을 사용자 문서에 기록합니다.
    /// 단일 필드 `$set`이므로 문서의 나머지 필드는 건드리지 않습니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 토큰이 기록된 최신 사용자 문서
    /// * `Ok(None)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn set_refresh_token(&self, id: &str, token: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid user id format".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": { "current_refresh_token": token, "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 무효화
        if updated_user.is_some() {
            let _ = self.invalidate_cache(id).await;
        }

        Ok(updated_user)
    }

    /// 리프레시 토큰 회전 (compare-and-swap)
    ///
    /// 제시된 토큰이 저장된 토큰과 정확히 일치하는 경우에만
    /// 새 토큰으로 교체합니다. 필터에 현재 토큰 값을 포함시켜
    /// 동시 갱신 경합에서 첫 번째 요청만 성공하도록 보장합니다.
    ///
    /// # 인자
    ///
    /// * `id` - 사용자 ID
    /// * `presented` - 클라이언트가 제시한 (현재 유효해야 하는) 토큰
    /// * `new_token` - 교체할 새 리프레시 토큰
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 회전 성공, 새 토큰이 기록된 사용자 문서
    /// * `Ok(None)` - 저장된 토큰이 제시된 값과 다름 (이미 회전되었거나 로그아웃됨)
    pub async fn rotate_refresh_token(
        &self,
        id: &str,
        presented: &str,
        new_token: &str,
    ) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid user id format".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id, "current_refresh_token": presented },
                doc! { "$set": { "current_refresh_token": new_token, "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 무효화
        if updated_user.is_some() {
            let _ = self.invalidate_cache(id).await;
        }

        Ok(updated_user)
    }

    /// 리프레시 토큰 제거 (로그아웃)
    ///
    /// 저장된 리프레시 토큰을 문서에서 제거하여 세션을 서버 측에서 종료합니다.
    /// 이후 동일 토큰으로의 갱신 시도는 일치 비교에서 실패합니다.
    pub async fn clear_refresh_token(&self, id: &str) -> Result<(), AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid user id format".to_string()))?;

        self.collection::<User>()
            .update_one(
                doc! { "_id": object_id },
                doc! {
                    "$unset": { "current_refresh_token": "" },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 무효화
        let _ = self.invalidate_cache(id).await;

        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 사용자 컬렉션에 필요한 모든 인덱스를 생성합니다.
    /// 애플리케이션 초기화 시점에 한 번 실행하여 쿼리 성능을 최적화합니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. **이메일 유니크 인덱스** - 중복 이메일 방지 및 조회 최적화
    /// 2. **사용자명 유니크 인덱스** - 중복 사용자명 방지 및 조회 최적화
    /// 3. **생성일 인덱스** - 최근 가입자 조회 및 정렬 최적화
    ///
    /// # 주의사항
    ///
    /// 이미 중복 데이터가 있는 경우 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        // 이메일 유니크 인덱스
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        // 사용자명 유니크 인덱스
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([email_index, username_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
