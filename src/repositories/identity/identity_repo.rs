//! # Identity 서비스 어댑터
//!
//! 인증 계정(로컬/OAuth)을 소유하는 원격 Identity 서비스 호출부입니다.
//! 비밀번호 해싱과 비교는 전적으로 원격 서비스가 수행합니다.
//!
//! ## 엔드포인트
//!
//! | 연산 | 요청 |
//! |------|------|
//! | 로컬 계정 생성 | `POST /v1/accounts/local` |
//! | OAuth 계정 생성 | `POST /v1/accounts/oauth` |
//! | OAuth 계정 조회 | `GET /v1/accounts/oauth/{provider}/{provider_id}` |
//! | 로컬 계정 조회 | `GET /v1/accounts/local/{user_id}` |
//! | 비밀번호 비교 | `POST /v1/accounts/local/password/compare` |
//! | 이메일 변경 | `PUT /v1/accounts/{user_id}/email` |
//! | 이메일 인증 상태 변경 | `PUT /v1/accounts/{user_id}/email-verification` |
//! | 계정 삭제 | `DELETE /v1/accounts/{user_id}` |

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use crate::{
    config::AuthProvider,
    core::errors::{AppError, AppResult},
    domain::models::{AuthAccount, CreatedAccount, CreatedOAuthAccount, OAuthCredential, PasswordCheck},
    repositories::remote::RemoteApi,
};

#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn create_local_account(&self, user_id: Uuid, email: &str, password: &str) -> AppResult<CreatedAccount>;

    async fn create_oauth_account(
        &self,
        user_id: Uuid,
        provider: AuthProvider,
        credential: &OAuthCredential,
    ) -> AppResult<CreatedOAuthAccount>;

    /// 프로바이더 계정을 조회합니다.
    ///
    /// 계정이 없을 때만 `Ok(None)`을 반환하며, 그 밖의 실패는 모두 에러로 전파됩니다.
    async fn find_oauth_account(&self, provider: AuthProvider, provider_id: &str) -> AppResult<Option<AuthAccount>>;

    async fn find_local_account(&self, user_id: Uuid) -> AppResult<Option<AuthAccount>>;

    /// 이메일/비밀번호를 비교합니다. 이메일이 없거나 불일치하면 `verified == false` 입니다.
    async fn compare_password(&self, email: &str, password: &str) -> AppResult<PasswordCheck>;

    async fn update_email(&self, user_id: Uuid, new_email: &str) -> AppResult<()>;

    async fn update_email_verification(&self, user_id: Uuid, verified: bool) -> AppResult<()>;

    async fn delete_account(&self, user_id: Uuid) -> AppResult<()>;
}

#[derive(Serialize)]
struct CreateOAuthAccountRequest<'a> {
    user_id: Uuid,
    provider: AuthProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
}

pub struct HttpIdentityClient {
    api: RemoteApi,
}

impl HttpIdentityClient {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

/// `NotFound`만 `None`으로 바꾸고 나머지 에러는 그대로 둡니다.
fn not_found_as_none<T>(result: AppResult<T>) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AppError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn create_local_account(&self, user_id: Uuid, email: &str, password: &str) -> AppResult<CreatedAccount> {
        let request = self.api
            .post("/v1/accounts/local")
            .json(&json!({ "user_id": user_id, "email": email, "password": password }));

        self.api.send_json(request).await
    }

    async fn create_oauth_account(
        &self,
        user_id: Uuid,
        provider: AuthProvider,
        credential: &OAuthCredential,
    ) -> AppResult<CreatedOAuthAccount> {
        let (access_token, code) = match credential {
            OAuthCredential::AccessToken(token) => (Some(token.as_str()), None),
            OAuthCredential::AuthorizationCode(code) => (None, Some(code.as_str())),
        };

        let request = self.api
            .post("/v1/accounts/oauth")
            .json(&CreateOAuthAccountRequest { user_id, provider, access_token, code });

        self.api.send_json(request).await
    }

    async fn find_oauth_account(&self, provider: AuthProvider, provider_id: &str) -> AppResult<Option<AuthAccount>> {
        let path = format!(
            "/v1/accounts/oauth/{}/{}",
            provider.as_str(),
            urlencoding::encode(provider_id)
        );

        not_found_as_none(self.api.send_json(self.api.get(&path)).await)
    }

    async fn find_local_account(&self, user_id: Uuid) -> AppResult<Option<AuthAccount>> {
        let path = format!("/v1/accounts/local/{}", user_id);
        not_found_as_none(self.api.send_json(self.api.get(&path)).await)
    }

    async fn compare_password(&self, email: &str, password: &str) -> AppResult<PasswordCheck> {
        let request = self.api
            .post("/v1/accounts/local/password/compare")
            .json(&json!({ "email": email, "password": password }));

        match self.api.send_json::<PasswordCheck>(request).await {
            Ok(check) => Ok(check),
            Err(AppError::NotFound(_)) | Err(AppError::AuthenticationError(_)) => {
                Ok(PasswordCheck { verified: false, user_id: None })
            }
            Err(e) => Err(e),
        }
    }

    async fn update_email(&self, user_id: Uuid, new_email: &str) -> AppResult<()> {
        let request = self.api
            .put(&format!("/v1/accounts/{}/email", user_id))
            .json(&json!({ "email": new_email }));

        self.api.send_empty(request).await
    }

    async fn update_email_verification(&self, user_id: Uuid, verified: bool) -> AppResult<()> {
        let request = self.api
            .put(&format!("/v1/accounts/{}/email-verification", user_id))
            .json(&json!({ "verified": verified }));

        self.api.send_empty(request).await
    }

    async fn delete_account(&self, user_id: Uuid) -> AppResult<()> {
        let request = self.api.delete(&format!("/v1/accounts/{}", user_id));
        self.api.send_empty(request).await
    }
}
