//! # 원격 회원가입 API 어댑터
//!
//! OAuth 로그인 중 계정이 없을 때 자동 가입에 사용합니다.
//! 프로바이더 액세스 토큰을 Bearer 헤더로 전달하면 원격 측이 디렉터리 레코드와
//! OAuth 계정을 한 번에 만들어 돌려줍니다.
//!
//! ```text
//! GET {SIGNUP_API_ENDPOINT}/{provider}
//! Authorization: Bearer <provider access token>
//! ```

use async_trait::async_trait;
use crate::{
    config::AuthProvider,
    core::errors::AppResult,
    domain::models::OAuthSignupResult,
    repositories::remote::RemoteApi,
};

#[async_trait]
pub trait SignupApi: Send + Sync {
    async fn oauth_signup(&self, provider: AuthProvider, access_token: &str) -> AppResult<OAuthSignupResult>;
}

pub struct HttpSignupApi {
    api: RemoteApi,
}

impl HttpSignupApi {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SignupApi for HttpSignupApi {
    async fn oauth_signup(&self, provider: AuthProvider, access_token: &str) -> AppResult<OAuthSignupResult> {
        let request = self.api
            .get(provider.as_str())
            .bearer_auth(access_token);

        self.api.send_json(request).await
    }
}
