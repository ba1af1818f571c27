//! 회원가입 / 이메일 인증 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::models::SignupResult;

#[derive(Debug, Deserialize, Validate)]
pub struct LocalSignupRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "비밀번호는 8-128자 사이여야 합니다"))]
    pub password: String,
}

/// 로컬 회원가입 응답
///
/// 가입은 성공했지만 인증 메일 발송이 실패한 경우 `verification_email_sent`가 `false` 입니다.
#[derive(Debug, Serialize)]
pub struct LocalSignupResponse {
    #[serde(flatten)]
    pub user: SignupResult,
    pub verification_email_sent: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OAuthSignupQuery {
    #[validate(length(min = 1, message = "인가 코드가 비어 있습니다"))]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyEmailQuery {
    #[validate(length(min = 1, message = "토큰이 필요합니다"))]
    pub token: String,
}
