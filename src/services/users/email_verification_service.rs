//! # 이메일 인증 워크플로
//!
//! ## 발송
//!
//! ```text
//! can_send? ──no──► TooManyRequests
//!    │yes
//! 코드 발급 (이메일 TTL) ─► 인증 토큰 서명 (user_id, email, code) ─► 메일 이벤트 발행 ─► 발송 기록 추가
//! ```
//!
//! 발송 제한은 최근 `window` 동안의 발송 기록 수로 계산하는 슬라이딩 윈도입니다.
//! 메일 이벤트가 나간 뒤 기록 추가가 실패해도 되돌리지 않고 로그만 남깁니다.
//!
//! ## 검증
//!
//! 토큰 서명 검증, 계정 이메일 일치, 코드 소비를 모두 통과해야 합니다. 토큰은 링크 소유를,
//! 코드는 일회성을 보장하므로 유효 기간 내 재사용된 토큰도 두 번째부터는 거부됩니다.
//!
//! 토큰의 이메일이 계정의 현재 이메일과 다르면 코드를 소비하지 않고 거부합니다.
//! 이메일 변경 전에 발급된 링크는 이 검사로 무효가 됩니다.

use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use uuid::Uuid;
use crate::{
    config::EmailVerificationConfig,
    core::errors::{AppError, AppResult},
    domain::models::{EmailVerificationClaims, MailEvent},
    repositories::{
        emails::SentEmailStore,
        events::MailEventPublisher,
        identity::IdentityClient,
        tokens::TokenIssuer,
    },
    services::auth::LoginCodeManager,
    utils::string_utils::mask_email,
};

/// 발송 제한과 링크 설정
#[derive(Debug, Clone)]
pub struct EmailVerificationPolicy {
    pub max_sent_emails: u64,
    pub window: Duration,
    pub verification_link: String,
}

impl EmailVerificationPolicy {
    pub fn from_env() -> Self {
        Self {
            max_sent_emails: EmailVerificationConfig::max_sent_emails(),
            window: EmailVerificationConfig::window(),
            verification_link: EmailVerificationConfig::verification_link(),
        }
    }

    fn link_for(&self, token: &str) -> String {
        let separator = if self.verification_link.contains('?') { '&' } else { '?' };
        format!("{}{}token={}", self.verification_link, separator, urlencoding::encode(token))
    }
}

pub struct EmailVerificationService {
    sent_emails: Arc<dyn SentEmailStore>,
    codes: Arc<LoginCodeManager>,
    tokens: Arc<dyn TokenIssuer>,
    identity: Arc<dyn IdentityClient>,
    mail: Arc<dyn MailEventPublisher>,
    policy: EmailVerificationPolicy,
}

impl EmailVerificationService {
    pub fn new(
        sent_emails: Arc<dyn SentEmailStore>,
        codes: Arc<LoginCodeManager>,
        tokens: Arc<dyn TokenIssuer>,
        identity: Arc<dyn IdentityClient>,
        mail: Arc<dyn MailEventPublisher>,
        policy: EmailVerificationPolicy,
    ) -> Self {
        Self { sent_emails, codes, tokens, identity, mail, policy }
    }

    /// 최근 `window` 동안의 발송 수가 한도 미만인지 확인합니다.
    pub async fn can_send(&self, user_id: Uuid) -> AppResult<bool> {
        let window = chrono::Duration::from_std(self.policy.window)
            .map_err(|e| AppError::InternalError(format!("잘못된 발송 제한 윈도: {}", e)))?;

        let sent = self.sent_emails.count_since(user_id, Utc::now() - window).await?;
        Ok(sent < self.policy.max_sent_emails)
    }

    pub async fn send_verification_email(&self, user_id: Uuid, email: &str) -> AppResult<()> {
        if !self.can_send(user_id).await? {
            log::warn!("인증 메일 발송 한도 초과: {}", user_id);
            return Err(AppError::TooManyRequests(
                "인증 메일 발송 한도를 초과했습니다. 잠시 후 다시 시도해주세요".to_string(),
            ));
        }

        let code = self.codes.issue_code(user_id).await?;

        let claims = EmailVerificationClaims {
            user_id,
            email: email.to_string(),
            code,
        };
        let token = self.tokens.generate_email_verification_token(&claims).await?;

        let event = MailEvent::email_verification(email, self.policy.link_for(&token));
        self.mail.publish_mail_event(&event).await?;

        if let Err(e) = self.sent_emails.append(user_id, email).await {
            log::error!("인증 메일은 발송되었으나 발송 기록 저장 실패: {} ({})", user_id, e);
            return Ok(());
        }

        log::info!("인증 메일 발송: {} ({})", user_id, mask_email(email));
        Ok(())
    }

    /// 계정에 저장된 이메일로 인증 메일을 다시 보냅니다.
    pub async fn resend_verification_email(&self, user_id: Uuid) -> AppResult<()> {
        let account = self.identity
            .find_local_account(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("로컬 계정이 없습니다: {}", user_id)))?;

        self.send_verification_email(user_id, &account.email).await
    }

    /// 인증 토큰을 확인하고 계정을 인증 상태로 바꿉니다.
    pub async fn verify_email_token(&self, token: &str) -> AppResult<Uuid> {
        let claims = self.tokens
            .verify_email_verification_token(token)
            .await?
            .ok_or_else(|| AppError::InvalidToken("인증 토큰이 유효하지 않습니다".to_string()))?;

        let account = self.identity
            .find_local_account(claims.user_id)
            .await?
            .ok_or_else(|| AppError::InvalidToken("인증 토큰이 유효하지 않습니다".to_string()))?;

        if !account.email.eq_ignore_ascii_case(&claims.email) {
            log::warn!("인증 토큰 이메일이 계정 이메일과 다름: {}", claims.user_id);
            return Err(AppError::InvalidToken("인증 토큰이 유효하지 않습니다".to_string()));
        }

        let consumed = self.codes
            .validate_code(claims.user_id, &claims.code)
            .await
            .map_err(|e| match e {
                AppError::AuthenticationError(msg) => AppError::InvalidToken(msg),
                other => other,
            })?;

        if !consumed {
            return Err(AppError::InvalidToken("인증 코드가 만료되었거나 이미 사용되었습니다".to_string()));
        }

        self.identity.update_email_verification(claims.user_id, true).await?;

        log::info!("이메일 인증 완료: {}", claims.user_id);
        Ok(claims.user_id)
    }
}
