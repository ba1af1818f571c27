//! # OAuth 로그인 서비스
//!
//! 프로바이더 자격 증명(액세스 토큰 또는 인가 코드)으로 사용자를 식별하고,
//! 계정이 없으면 원격 회원가입 API로 자동 가입시킵니다.
//!
//! ## 사용자 확정 흐름
//!
//! ```text
//! code ──exchange──► access token ──user_info──► provider_id
//!                                                   │
//!                     find_oauth_account(provider, provider_id)
//!                         ├─ Some(account) → (user_id, is_verified)
//!                         ├─ None          → signup_api.oauth_signup → (user_id, is_verified)
//!                         └─ Err(e)        → e 전파 (가입하지 않음)
//!                                                   │
//!                                 is_verified == false → AuthenticationError
//! ```

use std::sync::Arc;
use uuid::Uuid;
use crate::{
    config::AuthProvider,
    core::errors::{AppError, AppResult},
    domain::models::{OAuthCredential, OAuthLoginUrl, TokenPair},
    repositories::{identity::IdentityClient, signup::SignupApi, tokens::TokenIssuer},
    services::auth::{issue_token_pair, LoginCodeManager, OAuthProviders},
    utils::string_utils::generate_random_token,
};

const STATE_BYTES: usize = 16;

pub struct OAuthLoginService {
    identity: Arc<dyn IdentityClient>,
    signup_api: Arc<dyn SignupApi>,
    tokens: Arc<dyn TokenIssuer>,
    codes: Arc<LoginCodeManager>,
    providers: OAuthProviders,
}

impl OAuthLoginService {
    pub fn new(
        identity: Arc<dyn IdentityClient>,
        signup_api: Arc<dyn SignupApi>,
        tokens: Arc<dyn TokenIssuer>,
        codes: Arc<LoginCodeManager>,
        providers: OAuthProviders,
    ) -> Self {
        Self { identity, signup_api, tokens, codes, providers }
    }

    pub fn get_login_url(&self, provider: AuthProvider) -> AppResult<OAuthLoginUrl> {
        let api = self.providers.resolve(provider)?;
        let state = generate_random_token(STATE_BYTES);

        Ok(OAuthLoginUrl {
            login_url: api.login_url(&state),
            state,
        })
    }

    /// 인증된 사용자 ID를 확정합니다. 필요하면 자동 가입을 수행합니다.
    pub async fn get_or_create_verified_user(
        &self,
        provider: AuthProvider,
        credential: &OAuthCredential,
    ) -> AppResult<Uuid> {
        let api = self.providers.resolve(provider)?;

        let access_token = match credential {
            OAuthCredential::AccessToken(token) => token.clone(),
            OAuthCredential::AuthorizationCode(code) => api.exchange_code(code).await.map_err(|e| {
                log::warn!("{} 인가 코드 교환 실패: {}", provider, e);
                AppError::AuthenticationError(format!("{} 토큰 교환 실패", provider))
            })?,
        };

        let info = api.user_info(&access_token).await.map_err(|e| {
            log::warn!("{} 사용자 정보 조회 실패: {}", provider, e);
            AppError::AuthenticationError(format!("{} 사용자 정보 조회 실패", provider))
        })?;

        if info.provider_id.is_empty() {
            return Err(AppError::ValidationError("프로바이더 사용자 ID가 비어 있습니다".to_string()));
        }

        let (user_id, verified) = match self.identity.find_oauth_account(provider, &info.provider_id).await? {
            Some(account) => (account.user_id, account.is_verified),
            None => {
                log::info!("{} 계정 없음, 자동 가입 요청", provider);
                let created = self.signup_api.oauth_signup(provider, &access_token).await?;
                log::info!("{} 자동 가입 완료: {}", provider, created.user_id);
                (created.user_id, created.is_verified)
            }
        };

        if !verified {
            log::info!("OAuth 로그인 거부 (이메일 미인증): {}", user_id);
            return Err(AppError::AuthenticationError("이메일 인증이 필요합니다".to_string()));
        }

        Ok(user_id)
    }

    pub async fn issue_login_code(
        &self,
        provider: AuthProvider,
        credential: &OAuthCredential,
    ) -> AppResult<(String, Uuid)> {
        let user_id = self.get_or_create_verified_user(provider, credential).await?;
        let code = self.codes.issue_code(user_id).await?;

        log::info!("{} 로그인 코드 발급: {}", provider, user_id);
        Ok((code, user_id))
    }

    pub async fn login(&self, provider: AuthProvider, credential: &OAuthCredential) -> AppResult<TokenPair> {
        let user_id = self.get_or_create_verified_user(provider, credential).await?;

        log::info!("{} 로그인 성공: {}", provider, user_id);
        issue_token_pair(self.tokens.as_ref(), user_id).await
    }

    pub async fn verify_login_code(&self, user_id: Uuid, code: &str) -> AppResult<TokenPair> {
        if !self.codes.validate_code(user_id, code).await? {
            return Err(AppError::AuthenticationError("로그인 코드가 유효하지 않거나 만료되었습니다".to_string()));
        }

        issue_token_pair(self.tokens.as_ref(), user_id).await
    }
}
