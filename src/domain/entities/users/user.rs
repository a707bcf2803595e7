//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 계정 정보, 프로필 미디어 URL, 현재 세션의 리프레시 토큰을 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
///
/// ## 불변 조건
///
/// - `username`은 항상 소문자로 저장됩니다 (생성자에서 정규화)
/// - `username`과 `email`은 시스템 전체에서 유니크합니다
/// - `current_refresh_token`은 사용자당 하나만 유효합니다:
///   로그인 시 설정, 리프레시 시 회전, 로그아웃 시 제거
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자명 (unique, 소문자 정규화)
    pub username: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 전체 이름
    pub fullname: String,
    /// 해시된 비밀번호 (bcrypt)
    pub password_hash: String,
    /// 아바타 이미지 URL (필수)
    pub avatar_url: String,
    /// 커버 이미지 URL (선택)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    /// 현재 유효한 리프레시 토큰
    ///
    /// 제시된 리프레시 토큰은 이 값과 정확히 일치해야만 수락됩니다.
    /// 회전된 이전 토큰을 제시하면 세션 갱신이 거부됩니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_refresh_token: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 사용자명은 저장 전에 소문자로 정규화됩니다.
    /// 리프레시 토큰은 로그인 전까지 존재하지 않습니다.
    pub fn new(
        fullname: String,
        email: String,
        username: String,
        password_hash: String,
        avatar_url: String,
        cover_image_url: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username: username.to_lowercase(),
            email,
            fullname,
            password_hash,
            avatar_url,
            cover_image_url,
            current_refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 제시된 리프레시 토큰이 현재 세션의 토큰과 정확히 일치하는지 확인
    ///
    /// 저장된 토큰이 없는 경우(로그아웃 상태)는 항상 불일치입니다.
    pub fn refresh_token_matches(&self, presented: &str) -> bool {
        self.current_refresh_token
            .as_deref()
            .map(|stored| stored == presented)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "A B".to_string(),
            "a@b.com".to_string(),
            "MixedCase".to_string(),
            "$2b$04$hash".to_string(),
            "https://cdn.example.com/avatar.png".to_string(),
            None,
        )
    }

    #[test]
    fn test_new_user_lowercases_username() {
        let user = sample_user();
        assert_eq!(user.username, "mixedcase");
    }

    #[test]
    fn test_new_user_has_no_refresh_token() {
        let user = sample_user();
        assert!(user.current_refresh_token.is_none());
        assert!(!user.refresh_token_matches("anything"));
    }

    #[test]
    fn test_refresh_token_exact_match() {
        let mut user = sample_user();
        user.current_refresh_token = Some("token-one".to_string());

        assert!(user.refresh_token_matches("token-one"));
        assert!(!user.refresh_token_matches("token-two"));
        assert!(!user.refresh_token_matches("token-one "));
        assert!(!user.refresh_token_matches(""));
    }

    #[test]
    fn test_id_string_for_unsaved_user() {
        let user = sample_user();
        assert!(user.id_string().is_none());
    }
}
