use serde::{Deserialize, Serialize};

/// 프로바이더에서 조회한 사용자 정보 (저장하지 않음)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthUserInfo {
    pub provider_id: String,
    pub email: String,
    pub email_verified: bool,
}

/// 프로바이더 로그인 페이지 URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthLoginUrl {
    pub login_url: String,
    pub state: String,
}

/// 인가 코드 교환 응답 (세 프로바이더 공통 필드)
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
