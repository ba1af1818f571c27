//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소/원격 어댑터를 `Arc<dyn Trait>`로 주입받아 조합하며,
//! `main`에서 한 번 조립된 뒤 [`crate::core::registry::ServiceLocator`]에 등록됩니다.
//!
//! ```rust,ignore
//! use crate::services::{auth::LocalLoginService, users::SignupService};
//!
//! let signup = ServiceLocator::get::<SignupService>()?;
//! let result = signup.local_signup("a@x.com", "password").await?;
//! ```

pub mod auth;
pub mod users;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use crate::core::errors::AppError;
    use crate::services::auth::{LocalLoginService, LoginCodeManager};
    use crate::services::users::{EmailVerificationPolicy, EmailVerificationService, SignupService};
    use crate::test_support::{
        FakeIdentity, FakeProfile, FakeTokenIssuer, MemoryCodeStore, MemoryDirectory, MemorySentEmails,
        RecordingPublisher,
    };

    /// 가입 → 미인증 로그인 거부 → 이메일 인증 → 로그인 성공
    #[actix_web::test]
    async fn test_signup_verify_then_login() {
        let identity = Arc::new(FakeIdentity::default());
        let tokens = Arc::new(FakeTokenIssuer::default());
        let events = Arc::new(RecordingPublisher::default());
        let code_store = Arc::new(MemoryCodeStore::default());

        let signup = SignupService::new(
            Arc::new(MemoryDirectory::default()),
            identity.clone(),
            Arc::new(FakeProfile::default()),
            events.clone(),
        );
        let login = LocalLoginService::new(
            identity.clone(),
            tokens.clone(),
            Arc::new(LoginCodeManager::new(code_store.clone(), Duration::from_secs(300), "login_code:")),
        );
        let verification = EmailVerificationService::new(
            Arc::new(MemorySentEmails::default()),
            Arc::new(LoginCodeManager::new(code_store, Duration::from_secs(3600), "email_code:")),
            tokens,
            identity,
            events.clone(),
            EmailVerificationPolicy {
                max_sent_emails: 5,
                window: Duration::from_secs(86400),
                verification_link: "https://accounts.example.com/verify".to_string(),
            },
        );

        let user = signup.local_signup("a@x.com", "p").await.unwrap();

        let rejected = login.login("a@x.com", "p").await;
        assert!(matches!(rejected, Err(AppError::AuthenticationError(_))));

        verification.send_verification_email(user.user_id, "a@x.com").await.unwrap();
        let link = events.mail_events()[0].verification_link.clone();
        let token = urlencoding::decode(link.split_once("token=").unwrap().1).unwrap().into_owned();

        assert_eq!(verification.verify_email_token(&token).await.unwrap(), user.user_id);

        let tokens = login.login("a@x.com", "p").await.unwrap();
        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
    }
}
