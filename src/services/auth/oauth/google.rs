//! Google OAuth 2.0 (`openid email profile` 스코프)

use async_trait::async_trait;
use serde::Deserialize;
use crate::{
    config::{AuthProvider, OAuthClientConfig},
    core::errors::AppResult,
    domain::models::OAuthUserInfo,
};
use super::{OAuthApi, OAuthHttp};

/// `GET /oauth2/v2/userinfo` 응답
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    #[serde(default)]
    verified_email: bool,
}

impl From<GoogleUserInfo> for OAuthUserInfo {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            provider_id: info.id,
            email: info.email,
            email_verified: info.verified_email,
        }
    }
}

pub struct GoogleOAuthApi {
    http: OAuthHttp,
}

impl GoogleOAuthApi {
    pub fn new(config: OAuthClientConfig) -> Self {
        Self { http: OAuthHttp::new(AuthProvider::Google, config) }
    }
}

#[async_trait]
impl OAuthApi for GoogleOAuthApi {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn login_url(&self, state: &str) -> String {
        self.http.authorize_url(Some("openid email profile"), state)
    }

    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        Ok(self.http.exchange(code).await?.access_token)
    }

    async fn user_info(&self, access_token: &str) -> AppResult<OAuthUserInfo> {
        let info: GoogleUserInfo = self.http.fetch_user(access_token).await?;
        Ok(info.into())
    }
}
