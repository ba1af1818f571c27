//! # 로컬 로그인 서비스
//!
//! 이메일/비밀번호 로그인의 두 경로를 제공합니다.
//!
//! ```text
//! 2단계: issue_login_code(email, pw) ──► code ──► verify_login_code(user, code) ──► 토큰
//! 1단계: login(email, pw) ─────────────────────────────────────────────────────► 토큰
//! ```
//!
//! 두 경로 모두 이메일 인증이 끝난 계정만 통과합니다. 존재하지 않는 이메일,
//! 비밀번호 불일치, 미인증은 모두 같은 `AuthenticationError`로 응답됩니다.

use std::sync::Arc;
use uuid::Uuid;
use crate::{
    core::errors::{AppError, AppResult},
    domain::models::TokenPair,
    repositories::{identity::IdentityClient, tokens::TokenIssuer},
    services::auth::{issue_token_pair, LoginCodeManager},
    utils::string_utils::mask_email,
};

pub struct LocalLoginService {
    identity: Arc<dyn IdentityClient>,
    tokens: Arc<dyn TokenIssuer>,
    codes: Arc<LoginCodeManager>,
}

impl LocalLoginService {
    pub fn new(
        identity: Arc<dyn IdentityClient>,
        tokens: Arc<dyn TokenIssuer>,
        codes: Arc<LoginCodeManager>,
    ) -> Self {
        Self { identity, tokens, codes }
    }

    /// 자격 증명과 인증 여부를 확인하고 사용자 ID를 반환합니다.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Uuid> {
        let check = self.identity.compare_password(email, password).await?;
        if !check.verified {
            log::info!("로컬 로그인 실패 (자격 증명 불일치): {}", mask_email(email));
            return Err(AppError::AuthenticationError("자격 증명이 일치하지 않습니다".to_string()));
        }

        let user_id = check.user_id.ok_or_else(|| {
            AppError::InternalError("비밀번호 비교 결과에 사용자 ID가 없습니다".to_string())
        })?;

        let account = self.identity
            .find_local_account(user_id)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("로컬 계정을 찾을 수 없습니다: {}", user_id)))?;

        if !account.is_verified {
            log::info!("로컬 로그인 거부 (이메일 미인증): {}", user_id);
            return Err(AppError::AuthenticationError("이메일 인증이 필요합니다".to_string()));
        }

        Ok(user_id)
    }

    pub async fn issue_login_code(&self, email: &str, password: &str) -> AppResult<(String, Uuid)> {
        let user_id = self.authenticate(email, password).await?;
        let code = self.codes.issue_code(user_id).await?;

        log::info!("로컬 로그인 코드 발급: {}", user_id);
        Ok((code, user_id))
    }

    pub async fn verify_login_code(&self, user_id: Uuid, code: &str) -> AppResult<TokenPair> {
        if !self.codes.validate_code(user_id, code).await? {
            return Err(AppError::AuthenticationError("로그인 코드가 유효하지 않거나 만료되었습니다".to_string()));
        }

        issue_token_pair(self.tokens.as_ref(), user_id).await
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let user_id = self.authenticate(email, password).await?;

        log::info!("로컬 로그인 성공: {}", user_id);
        issue_token_pair(self.tokens.as_ref(), user_id).await
    }
}
