//! 미디어 스토리지 업로드 서비스 구현
//!
//! 회원가입 시 수신한 이미지 파일을 외부 미디어 스토리지
//! (Cloudinary 호환 API)에 업로드하고 호스팅 URL을 반환합니다.
//!
//! 업로드 요청은 서버에서 서명됩니다. API 비밀키는 절대
//! 요청 본문에 포함되지 않으며 서명 계산에만 사용됩니다.

use serde::Deserialize;
use sha2::{Digest, Sha256};
use singleton_macro::service;
use uuid::Uuid;

use crate::config::MediaStorageConfig;
use crate::domain::dto::users::request::register_request::FileUpload;
use crate::errors::errors::AppError;

/// 미디어 스토리지 업로드 응답
///
/// 업로드 API가 반환하는 필드 중 사용하는 것만 매핑합니다.
#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    /// 업로드된 리소스의 HTTPS URL
    secure_url: Option<String>,
}

/// 미디어 스토리지 업로드 서비스
///
/// 외부 스토리지와의 통신만 담당하며 영속성을 갖지 않습니다.
/// 업로드 실패는 `ExternalServiceError`로 보고되고, 필수 여부에 따른
/// 처리(아바타는 실패, 커버는 생략)는 호출자가 결정합니다.
#[service(name = "media")]
pub struct MediaService {
    // 외부 의존성 없음
}

impl MediaService {
    /// 이미지 파일을 미디어 스토리지에 업로드
    ///
    /// # Arguments
    ///
    /// * `file` - 업로드할 이미지 바이트와 원본 파일명
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 업로드된 이미지의 HTTPS URL
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - 요청 실패, 비정상 상태 코드,
    ///   또는 응답에 URL이 없는 경우
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let media = MediaService::instance();
    /// let avatar_url = media.upload_image(&avatar_file).await?;
    /// ```
    pub async fn upload_image(&self, file: &FileUpload) -> Result<String, AppError> {
        let upload_url = format!(
            "{}/{}/image/upload",
            MediaStorageConfig::upload_base_url(),
            MediaStorageConfig::cloud_name(),
        );

        let timestamp = chrono::Utc::now().timestamp();
        let public_id = Uuid::new_v4().simple().to_string();
        let signature = Self::sign_upload(&public_id, timestamp, &MediaStorageConfig::api_secret());

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone());

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", MediaStorageConfig::api_key())
            .text("timestamp", timestamp.to_string())
            .text("public_id", public_id.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let client = reqwest::Client::new();
        let response = client
            .post(&upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Media upload request failed: {}", e)))?;

        if !response.status().is_success() {
            log::error!("미디어 업로드 실패 - 상태 코드: {}, public_id: {}", response.status(), public_id);
            return Err(AppError::ExternalServiceError(format!(
                "Media upload failed with status {}",
                response.status()
            )));
        }

        let body: MediaUploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Invalid media upload response: {}", e)))?;

        body.secure_url.ok_or_else(|| {
            AppError::ExternalServiceError("Media upload response did not contain a URL".to_string())
        })
    }

    /// 업로드 요청 서명 생성
    ///
    /// 알파벳 순으로 정렬된 파라미터 문자열 뒤에 API 비밀키를 이어붙여
    /// SHA-256 해시의 16진수 표현을 만듭니다.
    fn sign_upload(public_id: &str, timestamp: i64, api_secret: &str) -> String {
        let to_sign = format!("public_id={}&timestamp={}{}", public_id, timestamp, api_secret);

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());

        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_upload_is_deterministic() {
        let first = MediaService::sign_upload("abc", 1700000000, "secret");
        let second = MediaService::sign_upload("abc", 1700000000, "secret");

        assert_eq!(first, second);
        // SHA-256 16진수 표현은 항상 64자
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_sign_upload_varies_with_inputs() {
        let base = MediaService::sign_upload("abc", 1700000000, "secret");

        assert_ne!(base, MediaService::sign_upload("abd", 1700000000, "secret"));
        assert_ne!(base, MediaService::sign_upload("abc", 1700000001, "secret"));
        assert_ne!(base, MediaService::sign_upload("abc", 1700000000, "other"));
    }
}
