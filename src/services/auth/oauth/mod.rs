//! # OAuth 2.0 프로바이더 어댑터
//!
//! Google / Naver / Kakao 의 Authorization Code Grant 를 공통 인터페이스 [`OAuthApi`]로 감쌉니다.
//!
//! ```text
//! 클라이언트 ── login_url(state) ──► 프로바이더 로그인 페이지
//!            ◄─ redirect ?code=...
//! 서버 ── exchange_code(code) ──► token_uri   (form POST, grant_type=authorization_code)
//!      ── user_info(token)    ──► user_info_uri (Bearer)
//! ```
//!
//! 프로바이더 목록은 닫혀 있으며 시작 시 한 번 [`OAuthProviders`]로 조립됩니다.
//! 설정되지 않은 프로바이더는 `None` 슬롯으로 남고, 요청 시 `ValidationError`가 됩니다.

pub mod google;
pub mod kakao;
pub mod naver;

pub use google::GoogleOAuthApi;
pub use kakao::KakaoOAuthApi;
pub use naver::NaverOAuthApi;

use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::{
    config::{AuthProvider, OAuthClientConfig},
    core::errors::{AppError, AppResult},
    domain::models::{OAuthTokenResponse, OAuthUserInfo},
};

#[async_trait]
pub trait OAuthApi: Send + Sync {
    fn provider(&self) -> AuthProvider;

    /// 프로바이더 인가 페이지 URL
    fn login_url(&self, state: &str) -> String;

    /// 인가 코드를 액세스 토큰으로 교환합니다.
    async fn exchange_code(&self, code: &str) -> AppResult<String>;

    async fn user_info(&self, access_token: &str) -> AppResult<OAuthUserInfo>;
}

/// 세 프로바이더가 공유하는 HTTP 호출부
pub(crate) struct OAuthHttp {
    client: Client,
    config: OAuthClientConfig,
    provider: AuthProvider,
}

impl OAuthHttp {
    pub(crate) fn new(provider: AuthProvider, config: OAuthClientConfig) -> Self {
        Self { client: Client::new(), config, provider }
    }

    pub(crate) fn authorize_url(&self, scope: Option<&str>, state: &str) -> String {
        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("state", state),
        ];
        if let Some(scope) = scope {
            params.push(("scope", scope));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.auth_uri, query_string)
    }

    pub(crate) async fn exchange(&self, code: &str) -> AppResult<OAuthTokenResponse> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.client
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", self.provider, e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패: {}", self.provider, error_text
            )));
        }

        response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", self.provider, e)))
    }

    pub(crate) async fn fetch_user<T: DeserializeOwned>(&self, access_token: &str) -> AppResult<T> {
        let response = self.client
            .get(&self.config.user_info_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", self.provider, e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 사용자 정보 조회 실패: {}", self.provider, error_text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 파싱 실패: {}", self.provider, e)))
    }
}

/// 프로바이더별 어댑터 테이블
#[derive(Default, Clone)]
pub struct OAuthProviders {
    pub google: Option<Arc<dyn OAuthApi>>,
    pub naver: Option<Arc<dyn OAuthApi>>,
    pub kakao: Option<Arc<dyn OAuthApi>>,
}

impl OAuthProviders {
    /// 환경 변수에 클라이언트 설정이 있는 프로바이더만 등록합니다.
    pub fn from_env() -> Self {
        let providers = Self {
            google: OAuthClientConfig::from_env(AuthProvider::Google)
                .map(|c| Arc::new(GoogleOAuthApi::new(c)) as Arc<dyn OAuthApi>),
            naver: OAuthClientConfig::from_env(AuthProvider::Naver)
                .map(|c| Arc::new(NaverOAuthApi::new(c)) as Arc<dyn OAuthApi>),
            kakao: OAuthClientConfig::from_env(AuthProvider::Kakao)
                .map(|c| Arc::new(KakaoOAuthApi::new(c)) as Arc<dyn OAuthApi>),
        };

        for provider in AuthProvider::OAUTH {
            if providers.slot(provider).is_none() {
                log::warn!("OAuth 프로바이더 비활성화 (설정 없음): {}", provider);
            }
        }

        providers
    }

    fn slot(&self, provider: AuthProvider) -> Option<&Arc<dyn OAuthApi>> {
        match provider {
            AuthProvider::Local => None,
            AuthProvider::Google => self.google.as_ref(),
            AuthProvider::Naver => self.naver.as_ref(),
            AuthProvider::Kakao => self.kakao.as_ref(),
        }
    }

    pub fn resolve(&self, provider: AuthProvider) -> AppResult<Arc<dyn OAuthApi>> {
        self.slot(provider)
            .cloned()
            .ok_or_else(|| AppError::ValidationError(format!("지원하지 않는 인증 프로바이더입니다: {}", provider)))
    }
}
