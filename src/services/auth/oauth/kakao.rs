//! Kakao 로그인
//!
//! 사용자 ID는 숫자로 오며 문자열로 변환해 사용합니다.

use async_trait::async_trait;
use serde::Deserialize;
use crate::{
    config::{AuthProvider, OAuthClientConfig},
    core::errors::AppResult,
    domain::models::OAuthUserInfo,
};
use super::{OAuthApi, OAuthHttp};

/// `GET /v2/user/me` 응답
#[derive(Debug, Deserialize)]
struct KakaoUser {
    id: i64,
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccount {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    is_email_verified: Option<bool>,
}

impl From<KakaoUser> for OAuthUserInfo {
    fn from(user: KakaoUser) -> Self {
        let account = user.kakao_account.unwrap_or_default();
        Self {
            provider_id: user.id.to_string(),
            email: account.email.unwrap_or_default(),
            email_verified: account.is_email_verified.unwrap_or(false),
        }
    }
}

pub struct KakaoOAuthApi {
    http: OAuthHttp,
}

impl KakaoOAuthApi {
    pub fn new(config: OAuthClientConfig) -> Self {
        Self { http: OAuthHttp::new(AuthProvider::Kakao, config) }
    }
}

#[async_trait]
impl OAuthApi for KakaoOAuthApi {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Kakao
    }

    fn login_url(&self, state: &str) -> String {
        self.http.authorize_url(Some("account_email"), state)
    }

    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        Ok(self.http.exchange(code).await?.access_token)
    }

    async fn user_info(&self, access_token: &str) -> AppResult<OAuthUserInfo> {
        let user: KakaoUser = self.http.fetch_user(access_token).await?;
        Ok(user.into())
    }
}
