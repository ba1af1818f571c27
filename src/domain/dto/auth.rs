//! 로그인 요청/응답 DTO

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use crate::domain::models::TokenPair;

#[derive(Debug, Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// OAuth 로그인 요청. `access_token`과 `code` 중 하나는 있어야 합니다.
#[derive(Debug, Deserialize)]
pub struct OAuthLoginRequest {
    pub access_token: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyLoginCodeRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 256, message = "로그인 코드가 필요합니다"))]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct LoginCodeResponse {
    pub user_id: Uuid,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer",
        }
    }
}
