//! 원격 Identity 서비스가 소유하는 인증 계정 모델

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};

/// 인증 계정 (원격 참조 전용)
///
/// 사용자당 로컬 계정 하나, OAuth 프로바이더별 계정 최대 하나가 존재하며
/// 유일성은 원격 Identity 서비스가 보장합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthAccount {
    pub id: String,
    pub user_id: Uuid,
    pub provider: AuthProvider,
    #[serde(default)]
    pub provider_id: Option<String>,
    pub email: String,
    pub is_verified: bool,
}

/// 로컬 계정 생성 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedAccount {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// OAuth 계정 생성 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedOAuthAccount {
    pub user_id: Uuid,
    pub provider_id: String,
    pub email: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// 비밀번호 비교 결과
///
/// 존재하지 않는 이메일과 비밀번호 불일치는 구분하지 않고 `verified == false`로 표현합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordCheck {
    pub verified: bool,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// OAuth 자격 증명: 프로바이더 액세스 토큰 또는 인가 코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthCredential {
    AccessToken(String),
    AuthorizationCode(String),
}

impl OAuthCredential {
    /// 요청 값에서 자격 증명을 만듭니다. 둘 다 있으면 액세스 토큰을 우선합니다.
    pub fn from_parts(access_token: Option<String>, code: Option<String>) -> AppResult<Self> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        match (non_empty(access_token), non_empty(code)) {
            (Some(token), _) => Ok(OAuthCredential::AccessToken(token)),
            (None, Some(code)) => Ok(OAuthCredential::AuthorizationCode(code)),
            (None, None) => Err(AppError::ValidationError(
                "액세스 토큰 또는 인가 코드가 필요합니다".to_string(),
            )),
        }
    }
}

/// 로컬 회원가입 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResult {
    pub user_id: Uuid,
    pub email: String,
    pub provider: Option<AuthProvider>,
    pub created_at: DateTime<Utc>,
}

/// OAuth 회원가입 결과 (원격 회원가입 API 응답 형식과 동일)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthSignupResult {
    pub user_id: Uuid,
    pub provider: AuthProvider,
    pub provider_id: String,
    pub email: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_prefers_access_token() {
        let credential = OAuthCredential::from_parts(Some("tok".into()), Some("code".into())).unwrap();
        assert_eq!(credential, OAuthCredential::AccessToken("tok".into()));
    }

    #[test]
    fn test_credential_falls_back_to_code_and_rejects_blank() {
        let credential = OAuthCredential::from_parts(Some("  ".into()), Some("code".into())).unwrap();
        assert_eq!(credential, OAuthCredential::AuthorizationCode("code".into()));

        let missing = OAuthCredential::from_parts(None, Some(String::new()));
        assert!(matches!(missing, Err(AppError::ValidationError(_))));
    }
}
