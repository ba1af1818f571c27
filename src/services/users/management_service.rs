//! # 사용자 관리 서비스
//!
//! 디렉터리 사용자의 상태 변경(보관, 복구, 차단, 삭제)과 이메일 변경을 담당합니다.
//! 모든 상태 변경은 의존 서비스가 따라올 수 있도록 사용자 이벤트를 발행합니다.
//!
//! | 연산 | 호출자 | 이벤트 |
//! |------|--------|--------|
//! | `archive_user` | 본인, 관리자 | `user_archived` |
//! | `restore_user` | 본인, 관리자 | `user_restored` |
//! | `block_user` / `unblock_user` | 관리자 | `user_blocked` / `user_unblocked` |
//! | `delete_user` | 관리자 | `user_deleted` |

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{entities::DirectoryUser, models::{AuthAccount, UserEvent}},
    repositories::{
        events::UserEventPublisher,
        identity::IdentityClient,
        profile::ProfileClient,
        users::UserDirectory,
    },
    services::users::EmailVerificationService,
    utils::string_utils::mask_email,
};

pub struct UserManagementService {
    directory: Arc<dyn UserDirectory>,
    identity: Arc<dyn IdentityClient>,
    profile: Arc<dyn ProfileClient>,
    events: Arc<dyn UserEventPublisher>,
    verification: Arc<EmailVerificationService>,
    delete_delay: Duration,
}

impl UserManagementService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        identity: Arc<dyn IdentityClient>,
        profile: Arc<dyn ProfileClient>,
        events: Arc<dyn UserEventPublisher>,
        verification: Arc<EmailVerificationService>,
        delete_delay: Duration,
    ) -> Self {
        Self { directory, identity, profile, events, verification, delete_delay }
    }

    pub async fn get_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        self.directory
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))
    }

    /// 보관 처리하고 `delete_delay` 후 삭제를 예약합니다.
    pub async fn archive_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        let user = self.directory.archive_user(user_id, self.delete_delay).await?;
        self.events.publish_user_event(&UserEvent::archived(user.id, &user.sync_code)).await?;

        log::info!("사용자 보관: {} (삭제 예정 {:?})", user.id, user.delete_after);
        Ok(user)
    }

    pub async fn restore_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        let user = self.directory.restore_user(user_id).await?;
        self.events.publish_user_event(&UserEvent::restored(user.id, &user.sync_code)).await?;

        log::info!("사용자 복구: {}", user.id);
        Ok(user)
    }

    pub async fn block_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        let user = self.directory.block_user(user_id, true).await?;
        self.events.publish_user_event(&UserEvent::blocked(user.id, &user.sync_code)).await?;

        log::info!("사용자 차단: {}", user.id);
        Ok(user)
    }

    pub async fn unblock_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        let user = self.directory.block_user(user_id, false).await?;
        self.events.publish_user_event(&UserEvent::unblocked(user.id, &user.sync_code)).await?;

        log::info!("사용자 차단 해제: {}", user.id);
        Ok(user)
    }

    /// 즉시 영구 삭제합니다.
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        self.directory.delete_user(user_id).await?;
        self.events.publish_user_event(&UserEvent::deleted(user_id)).await?;

        log::info!("사용자 삭제: {}", user_id);
        Ok(())
    }

    /// 로컬 계정의 이메일을 바꾸고 새 주소로 인증 메일을 보냅니다.
    ///
    /// 인증 상태 해제 → Identity 이메일 → 프로필 이메일 순서로 진행합니다.
    /// 중간에 실패하면 이미 바뀐 이메일과 인증 상태를 원래 값으로 되돌립니다.
    /// 반환값은 인증 메일 발송 성공 여부입니다.
    pub async fn change_email(&self, user_id: Uuid, new_email: &str) -> AppResult<bool> {
        let user = self.get_user(user_id).await?;
        let account = self.identity
            .find_local_account(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("로컬 계정이 없습니다: {}", user_id)))?;

        if account.email == new_email {
            return Err(AppError::ValidationError("현재 이메일과 같습니다".to_string()));
        }

        self.identity.update_email_verification(user_id, false).await?;

        if let Err(cause) = self.identity.update_email(user_id, new_email).await {
            log::warn!("인증 계정 이메일 변경 실패, 인증 상태 복구: {} ({})", user_id, cause);
            let failures = self.rollback_email_change(&account, false).await;
            return Err(AppError::with_compensation(cause, failures));
        }

        if let Err(cause) = self.profile.update_email(user_id, new_email, &user.sync_code).await {
            log::warn!("프로필 이메일 변경 실패, 인증 계정 이메일 복구: {} ({})", user_id, cause);
            let failures = self.rollback_email_change(&account, true).await;
            return Err(AppError::with_compensation(cause, failures));
        }

        log::info!("이메일 변경: {} ({})", user_id, mask_email(new_email));

        match self.verification.send_verification_email(user_id, new_email).await {
            Ok(()) => Ok(true),
            Err(e) => {
                log::warn!("이메일 변경 후 인증 메일 발송 실패: {} ({})", user_id, e);
                Ok(false)
            }
        }
    }

    /// 변경 전 계정 상태로 되돌립니다. 모든 단계를 시도하고 실패를 모아 반환합니다.
    async fn rollback_email_change(&self, previous: &AuthAccount, email_changed: bool) -> Vec<AppError> {
        let mut failures = Vec::new();

        if email_changed {
            if let Err(e) = self.identity.update_email(previous.user_id, &previous.email).await {
                log::error!("보상 실패 - 인증 계정 이메일 복구: {} ({})", previous.user_id, e);
                failures.push(e);
            }
        }

        if previous.is_verified {
            if let Err(e) = self.identity.update_email_verification(previous.user_id, true).await {
                log::error!("보상 실패 - 인증 상태 복구: {} ({})", previous.user_id, e);
                failures.push(e);
            }
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use crate::domain::{entities::UserStatus, models::UserEventType};
    use crate::services::{auth::LoginCodeManager, users::EmailVerificationPolicy};
    use crate::test_support::{
        FakeIdentity, FakeProfile, FakeTokenIssuer, MemoryCodeStore, MemoryDirectory, MemorySentEmails,
        RecordingPublisher,
    };

    struct Fixture {
        directory: Arc<MemoryDirectory>,
        identity: Arc<FakeIdentity>,
        profile: Arc<FakeProfile>,
        events: Arc<RecordingPublisher>,
        service: UserManagementService,
    }

    fn fixture() -> Fixture {
        let directory = Arc::new(MemoryDirectory::default());
        let identity = Arc::new(FakeIdentity::default());
        let profile = Arc::new(FakeProfile::default());
        let events = Arc::new(RecordingPublisher::default());
        let verification = Arc::new(EmailVerificationService::new(
            Arc::new(MemorySentEmails::default()),
            Arc::new(LoginCodeManager::new(Arc::new(MemoryCodeStore::default()), Duration::from_secs(3600), "email_code:")),
            Arc::new(FakeTokenIssuer::default()),
            identity.clone(),
            events.clone(),
            EmailVerificationPolicy {
                max_sent_emails: 5,
                window: Duration::from_secs(86400),
                verification_link: "https://x.com/verify".to_string(),
            },
        ));

        let service = UserManagementService::new(
            directory.clone(),
            identity.clone(),
            profile.clone(),
            events.clone(),
            verification,
            Duration::from_secs(86400),
        );

        Fixture { directory, identity, profile, events, service }
    }

    #[actix_web::test]
    async fn test_archive_and_restore_emit_events_with_sync_code() {
        let f = fixture();
        let user = f.directory.seed(Uuid::new_v4());

        let archived = f.service.archive_user(user.id).await.unwrap();
        assert_eq!(archived.status, UserStatus::Archived);
        assert!(archived.delete_after.is_some());

        let restored = f.service.restore_user(user.id).await.unwrap();
        assert_eq!(restored.status, UserStatus::Active);
        assert!(restored.delete_after.is_none());

        let events = f.events.user_events();
        assert_eq!(events[0].event_type, UserEventType::Archived);
        assert_eq!(events[1].event_type, UserEventType::Restored);
        assert!(events.iter().all(|e| e.sync_code.as_deref() == Some(user.sync_code.as_str())));
    }

    #[actix_web::test]
    async fn test_block_and_unblock() {
        let f = fixture();
        let user = f.directory.seed(Uuid::new_v4());

        assert_eq!(f.service.block_user(user.id).await.unwrap().status, UserStatus::Blocked);
        assert_eq!(f.service.unblock_user(user.id).await.unwrap().status, UserStatus::Active);

        let types: Vec<_> = f.events.user_events().iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec![UserEventType::Blocked, UserEventType::Unblocked]);
    }

    #[actix_web::test]
    async fn test_delete_user_emits_deleted_event() {
        let f = fixture();
        let user = f.directory.seed(Uuid::new_v4());

        f.service.delete_user(user.id).await.unwrap();

        assert!(f.directory.get(user.id).is_none());
        let events = f.events.user_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, UserEventType::Deleted);
        assert!(events[0].sync_code.is_none());
    }

    #[actix_web::test]
    async fn test_missing_user_is_not_found_without_events() {
        let f = fixture();
        let missing = Uuid::new_v4();

        assert_eq!(f.service.get_user(missing).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(f.service.archive_user(missing).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(f.service.delete_user(missing).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert!(f.events.user_events().is_empty());
    }

    #[actix_web::test]
    async fn test_change_email_updates_both_stores_and_resets_verification() {
        let f = fixture();
        let user = f.directory.seed(Uuid::new_v4());
        f.identity.add_local(user.id, "old@x.com", "p", true);

        let sent = f.service.change_email(user.id, "new@x.com").await.unwrap();

        assert!(sent);
        assert_eq!(f.identity.email_of(user.id).as_deref(), Some("new@x.com"));
        assert_eq!(f.profile.email_of(user.id).as_deref(), Some("new@x.com"));
        assert!(!f.identity.is_verified(user.id));
        assert_eq!(f.events.mail_events().len(), 1);
    }

    #[actix_web::test]
    async fn test_change_email_restores_identity_when_profile_fails() {
        let f = fixture();
        let user = f.directory.seed(Uuid::new_v4());
        f.identity.add_local(user.id, "old@x.com", "p", true);
        f.profile.fail_updates();

        let error = f.service.change_email(user.id, "new@x.com").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InternalFailure);
        assert_eq!(f.identity.email_of(user.id).as_deref(), Some("old@x.com"));
        assert!(f.identity.is_verified(user.id));
    }

    #[actix_web::test]
    async fn test_change_email_keeps_old_state_when_unverify_fails() {
        let f = fixture();
        let user = f.directory.seed(Uuid::new_v4());
        f.identity.add_local(user.id, "old@x.com", "p", true);
        f.profile.seed(user.id, "old@x.com", &user.sync_code);
        f.identity.fail_verification_updates();

        let error = f.service.change_email(user.id, "new@x.com").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InternalFailure);
        assert_eq!(f.identity.email_of(user.id).as_deref(), Some("old@x.com"));
        assert_eq!(f.profile.email_of(user.id).as_deref(), Some("old@x.com"));
        assert!(f.identity.is_verified(user.id));
        assert!(f.events.mail_events().is_empty());
    }

    #[actix_web::test]
    async fn test_change_email_restores_verification_when_identity_update_fails() {
        let f = fixture();
        let user = f.directory.seed(Uuid::new_v4());
        f.identity.add_local(user.id, "old@x.com", "p", true);
        f.identity.fail_email_updates();

        let error = f.service.change_email(user.id, "new@x.com").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InternalFailure);
        assert!(!matches!(error, AppError::SagaCompensationFailed { .. }));
        assert_eq!(f.identity.email_of(user.id).as_deref(), Some("old@x.com"));
        assert!(f.identity.is_verified(user.id));
    }

    #[actix_web::test]
    async fn test_change_email_never_leaves_new_address_verified() {
        let f = fixture();
        let user = f.directory.seed(Uuid::new_v4());
        f.identity.add_local(user.id, "old@x.com", "p", true);
        f.events.fail_publishes();

        // 인증 메일 발송이 실패해도 새 주소는 미인증 상태로 남음
        let sent = f.service.change_email(user.id, "new@x.com").await.unwrap();

        assert!(!sent);
        assert_eq!(f.identity.email_of(user.id).as_deref(), Some("new@x.com"));
        assert!(!f.identity.is_verified(user.id));
    }
}
