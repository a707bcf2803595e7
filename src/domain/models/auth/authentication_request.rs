use serde::{Deserialize, Serialize};

/// 인증 미들웨어의 동작 모드
///
/// - `Required`: 유효한 액세스 토큰이 없으면 401로 요청을 차단
/// - `Optional`: 토큰이 있으면 사용자 정보를 첨부하고, 없어도 요청 진행
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuthMode {
    Required,
    Optional,
}
