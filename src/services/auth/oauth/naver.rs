//! Naver 로그인 (네이버 아이디로 로그인)
//!
//! 사용자 정보는 `{"resultcode": "00", "response": {...}}` 형태로 감싸져 옵니다.
//! Naver 는 이메일 인증 여부를 주지 않으며, 이메일이 제공되면 인증된 것으로 봅니다.

use async_trait::async_trait;
use serde::Deserialize;
use crate::{
    config::{AuthProvider, OAuthClientConfig},
    core::errors::{AppError, AppResult},
    domain::models::OAuthUserInfo,
};
use super::{OAuthApi, OAuthHttp};

#[derive(Debug, Deserialize)]
struct NaverProfileResponse {
    resultcode: String,
    #[serde(default)]
    message: Option<String>,
    response: Option<NaverProfile>,
}

#[derive(Debug, Deserialize)]
struct NaverProfile {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl TryFrom<NaverProfileResponse> for OAuthUserInfo {
    type Error = AppError;

    fn try_from(body: NaverProfileResponse) -> Result<Self, Self::Error> {
        let profile = match (body.resultcode.as_str(), body.response) {
            ("00", Some(profile)) => profile,
            (code, _) => {
                return Err(AppError::ExternalServiceError(format!(
                    "naver 사용자 정보 오류 {}: {}", code, body.message.unwrap_or_default()
                )));
            }
        };

        let email = profile.email.filter(|e| !e.is_empty());
        Ok(Self {
            provider_id: profile.id,
            email_verified: email.is_some(),
            email: email.unwrap_or_default(),
        })
    }
}

pub struct NaverOAuthApi {
    http: OAuthHttp,
}

impl NaverOAuthApi {
    pub fn new(config: OAuthClientConfig) -> Self {
        Self { http: OAuthHttp::new(AuthProvider::Naver, config) }
    }
}

#[async_trait]
impl OAuthApi for NaverOAuthApi {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Naver
    }

    fn login_url(&self, state: &str) -> String {
        self.http.authorize_url(None, state)
    }

    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        Ok(self.http.exchange(code).await?.access_token)
    }

    async fn user_info(&self, access_token: &str) -> AppResult<OAuthUserInfo> {
        let body: NaverProfileResponse = self.http.fetch_user(access_token).await?;
        OAuthUserInfo::try_from(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naver_profile_with_email_is_verified() {
        let body: NaverProfileResponse = serde_json::from_str(
            r#"{"resultcode":"00","message":"success","response":{"id":"n-1","email":"a@naver.com"}}"#
        ).unwrap();

        let info = OAuthUserInfo::try_from(body).unwrap();
        assert_eq!(info.provider_id, "n-1");
        assert!(info.email_verified);
    }

    #[test]
    fn test_naver_error_result_code() {
        let body: NaverProfileResponse = serde_json::from_str(
            r#"{"resultcode":"024","message":"Authentication failed"}"#
        ).unwrap();

        assert!(matches!(OAuthUserInfo::try_from(body), Err(AppError::ExternalServiceError(_))));
    }
}
