use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 로그인 성공 시 발급되는 토큰 쌍
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// 이메일 인증 토큰에 담긴 (사용자, 이메일, 코드) 삼중항
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailVerificationClaims {
    pub user_id: Uuid,
    pub email: String,
    pub code: String,
}
