use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;

/// 사용자 응답 DTO (공개 프로젝션)
///
/// 엔티티에서 비밀번호 해시와 리프레시 토큰을 제거한 형태입니다.
/// 어떤 응답 경로로도 두 필드는 노출되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub fullname: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    /// 생성 시간 (RFC 3339 문자열)
    pub created_at: String,
    /// 수정 시간 (RFC 3339 문자열)
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            fullname,
            avatar_url,
            cover_image_url,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            fullname,
            avatar_url,
            cover_image_url,
            created_at: created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// 로그인 응답 데이터 (JWT 토큰 포함)
///
/// 쿠키를 사용할 수 없는 클라이언트를 위해 토큰을 본문에도 포함합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// 토큰 갱신 응답 데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefreshData {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new(
            "A B".to_string(),
            "a@b.com".to_string(),
            "AB".to_string(),
            "$2b$04$secret-hash".to_string(),
            "https://cdn.example.com/avatar.png".to_string(),
            Some("https://cdn.example.com/cover.png".to_string()),
        );
        user.current_refresh_token = Some("live-refresh-token".to_string());
        user
    }

    #[test]
    fn test_projection_drops_sensitive_fields() {
        let response = UserResponse::from(sample_user());
        let body = serde_json::to_value(&response).unwrap();

        let object = body.as_object().unwrap();
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("password_hash"));
        assert!(!object.contains_key("currentRefreshToken"));
        assert!(!object.contains_key("current_refresh_token"));
        assert!(!object.contains_key("refreshToken"));
    }

    #[test]
    fn test_projection_keeps_public_fields() {
        let response = UserResponse::from(sample_user());
        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body["username"], "ab");
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["fullname"], "A B");
        assert_eq!(body["avatarUrl"], "https://cdn.example.com/avatar.png");
        assert_eq!(body["coverImageUrl"], "https://cdn.example.com/cover.png");
        assert!(body["createdAt"].is_string());
        assert!(body["updatedAt"].is_string());
    }

    #[test]
    fn test_login_data_camel_case_keys() {
        let data = LoginData {
            user: UserResponse::from(sample_user()),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        };
        let body = serde_json::to_value(&data).unwrap();

        assert_eq!(body["accessToken"], "access");
        assert_eq!(body["refreshToken"], "refresh");
        assert!(body["user"].is_object());
    }
}
