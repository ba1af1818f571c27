//! # 회원가입 사가
//!
//! 세 개의 독립된 저장소에 걸쳐 계정을 만드는 오케스트레이터입니다.
//! 단일 트랜잭션이 없으므로 실패 시 완료된 단계를 역순으로 되돌립니다.
//!
//! ## 상태 전이
//!
//! ```text
//! Start ──► DirectoryCreated ──► IdentityCreated ──► ProfileCreated (성공)
//!   │              │                    │
//!   │ 실패: 종료    │ 실패                │ 실패
//!   ▼              ▼                    ▼
//! (보상 없음)   디렉터리 삭제        Identity 계정 삭제
//!                  + 삭제 이벤트        → 디렉터리 삭제 + 삭제 이벤트
//! ```
//!
//! - 각 단계는 앞 단계의 결과를 사용하므로 순차 실행합니다 (sync code → 프로필 생성).
//! - 재시도하지 않습니다. 보상은 모든 단계를 시도하며 실패를 모아 [`AppError::SagaCompensationFailed`]로 반환합니다.
//! - 삭제 이벤트는 디렉터리 레코드가 실제로 삭제된 경우에만 한 번 발행됩니다.
//! - 요청이 중간에 취소되면 이후 단계는 실행되지 않으며 보상도 수행하지 않습니다.

use std::sync::Arc;
use uuid::Uuid;
use crate::{
    config::AuthProvider,
    core::errors::{AppError, AppResult},
    domain::models::{OAuthCredential, OAuthSignupResult, SignupResult, UserEvent},
    repositories::{
        events::UserEventPublisher,
        identity::IdentityClient,
        profile::ProfileClient,
        users::UserDirectory,
    },
    utils::string_utils::mask_email,
};

/// 실패 시점까지 완료된 마지막 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completed {
    Directory,
    Identity,
}

pub struct SignupService {
    directory: Arc<dyn UserDirectory>,
    identity: Arc<dyn IdentityClient>,
    profile: Arc<dyn ProfileClient>,
    events: Arc<dyn UserEventPublisher>,
}

impl SignupService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        identity: Arc<dyn IdentityClient>,
        profile: Arc<dyn ProfileClient>,
        events: Arc<dyn UserEventPublisher>,
    ) -> Self {
        Self { directory, identity, profile, events }
    }

    pub async fn local_signup(&self, email: &str, password: &str) -> AppResult<SignupResult> {
        let user = self.directory.create_user(Uuid::new_v4()).await?;
        log::info!("회원가입 1/3 디렉터리 생성: {}", user.id);

        let account = match self.identity.create_local_account(user.id, email, password).await {
            Ok(account) => account,
            Err(e) => return Err(self.compensate(user.id, Completed::Directory, e).await),
        };
        log::info!("회원가입 2/3 로컬 계정 생성: {} ({})", user.id, mask_email(email));

        if let Err(e) = self.profile.create_profile(user.id, email, &user.sync_code).await {
            return Err(self.compensate(user.id, Completed::Identity, e).await);
        }
        log::info!("회원가입 3/3 프로필 생성: {}", user.id);

        Ok(SignupResult {
            user_id: user.id,
            email: email.to_string(),
            provider: Some(AuthProvider::Local),
            created_at: account.created_at,
        })
    }

    pub async fn oauth_signup(
        &self,
        provider: AuthProvider,
        credential: &OAuthCredential,
    ) -> AppResult<OAuthSignupResult> {
        if !provider.is_oauth() {
            return Err(AppError::ValidationError(format!("OAuth 프로바이더가 아닙니다: {}", provider)));
        }

        let user = self.directory.create_user(Uuid::new_v4()).await?;
        log::info!("{} 회원가입 1/3 디렉터리 생성: {}", provider, user.id);

        let account = match self.identity.create_oauth_account(user.id, provider, credential).await {
            Ok(account) => account,
            Err(e) => return Err(self.compensate(user.id, Completed::Directory, e).await),
        };
        log::info!("{} 회원가입 2/3 OAuth 계정 생성: {}", provider, user.id);

        if let Err(e) = self.profile.create_profile(user.id, &account.email, &user.sync_code).await {
            return Err(self.compensate(user.id, Completed::Identity, e).await);
        }
        log::info!("{} 회원가입 3/3 프로필 생성: {}", provider, user.id);

        Ok(OAuthSignupResult {
            user_id: user.id,
            provider,
            provider_id: account.provider_id,
            email: account.email,
            is_verified: account.is_verified,
            created_at: account.created_at,
        })
    }

    /// 완료된 단계를 역순으로 되돌리고 최종 에러를 만듭니다.
    async fn compensate(&self, user_id: Uuid, completed: Completed, cause: AppError) -> AppError {
        log::warn!("회원가입 실패, 보상 시작: {} ({})", user_id, cause);
        let mut failures = Vec::new();

        if completed == Completed::Identity {
            if let Err(e) = self.identity.delete_account(user_id).await {
                log::error!("보상 실패 - 인증 계정 삭제: {} ({})", user_id, e);
                failures.push(e);
            }
        }

        match self.directory.delete_user(user_id).await {
            Ok(()) => {
                if let Err(e) = self.events.publish_user_event(&UserEvent::deleted(user_id)).await {
                    log::error!("보상 실패 - 삭제 이벤트 발행: {} ({})", user_id, e);
                    failures.push(e);
                }
            }
            Err(e) => {
                log::error!("보상 실패 - 디렉터리 삭제: {} ({})", user_id, e);
                failures.push(e);
            }
        }

        if failures.is_empty() {
            log::info!("회원가입 보상 완료: {}", user_id);
        }

        AppError::with_compensation(cause, failures)
    }
}
