//! 인증 서비스 모듈
//!
//! - [`LoginCodeManager`]: 일회용 로그인 코드 발급/검증
//! - [`LocalLoginService`]: 이메일/비밀번호 로그인
//! - [`OAuthLoginService`]: Google / Naver / Kakao 로그인과 자동 가입
//! - [`oauth`]: 프로바이더 어댑터와 [`OAuthProviders`] 레지스트리

pub mod local_login_service;
pub mod login_code;
pub mod oauth;
pub mod oauth_login_service;

pub use local_login_service::LocalLoginService;
pub use login_code::LoginCodeManager;
pub use oauth::{OAuthApi, OAuthProviders};
pub use oauth_login_service::OAuthLoginService;

use uuid::Uuid;
use crate::{
    core::errors::AppResult,
    domain::models::TokenPair,
    repositories::tokens::TokenIssuer,
};

/// 액세스/리프레시 토큰을 차례로 발급합니다.
pub(crate) async fn issue_token_pair(tokens: &dyn TokenIssuer, user_id: Uuid) -> AppResult<TokenPair> {
    Ok(TokenPair {
        access_token: tokens.generate_access_token(user_id).await?,
        refresh_token: tokens.generate_refresh_token(user_id).await?,
    })
}
