use serde::Serialize;

/// API 응답 래퍼
///
/// 모든 성공 응답이 공유하는 표준 봉투입니다.
/// 에러 응답은 `AppError::error_response()`가 동일한 키 규칙으로 렌더링합니다.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// 응답 래퍼 생성. 400 미만의 상태 코드는 성공으로 표시됩니다.
    pub fn new(status_code: u16, data: T, message: &str) -> Self {
        Self {
            status_code,
            data,
            message: message.to_string(),
            success: status_code < 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_camel_case_shape() {
        let response = ApiResponse::new(201, serde_json::json!({"username": "ab"}), "User registered Successfully");
        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body["statusCode"], 201);
        assert_eq!(body["data"]["username"], "ab");
        assert_eq!(body["message"], "User registered Successfully");
        assert_eq!(body["success"], true);
    }

    #[test]
    fn test_api_response_success_flag_follows_status() {
        let ok = ApiResponse::new(200, (), "ok");
        assert!(ok.success);
    }
}
