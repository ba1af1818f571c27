//! 서비스 테스트용 인메모리 구현체
//!
//! 각 fake 는 운영 구현체와 같은 트레이트를 구현하며, 실패 주입과 시간 조작 헬퍼를 제공합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::{
    caching::CompareAndDelete,
    config::AuthProvider,
    core::errors::{AppError, AppResult},
    domain::{
        entities::{DirectoryUser, SentEmailRecord},
        models::{
            AuthAccount, CreatedAccount, CreatedOAuthAccount, EmailVerificationClaims, MailEvent,
            OAuthCredential, OAuthSignupResult, OAuthUserInfo, PasswordCheck, ProfileRecord, UserEvent,
        },
    },
    repositories::{
        codes::CodeStore,
        emails::SentEmailStore,
        events::{MailEventPublisher, UserEventPublisher},
        identity::IdentityClient,
        profile::ProfileClient,
        signup::SignupApi,
        tokens::TokenIssuer,
        users::UserDirectory,
    },
    services::auth::OAuthApi,
};

fn injected(flag: &AtomicBool) -> bool {
    flag.load(Ordering::SeqCst)
}

// ---------------------------------------------------------------------------
// Code store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryCodeStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    fail_next: AtomicBool,
}

impl MemoryCodeStore {
    /// 저장된 모든 코드를 즉시 만료시킵니다.
    pub fn expire_all(&self) {
        let now = Instant::now();
        for (_, expires_at) in self.entries.lock().unwrap().values_mut() {
            *expires_at = now;
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn put(&self, key: &str, user_id: &str, ttl: Duration) -> AppResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::RedisError("connection refused".to_string()));
        }

        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (user_id.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn take_if_owner(&self, key: &str, user_id: &str) -> AppResult<CompareAndDelete> {
        let mut entries = self.entries.lock().unwrap();

        let outcome = match entries.get(key) {
            None => CompareAndDelete::Missing,
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                CompareAndDelete::Missing
            }
            Some((owner, _)) if owner != user_id => CompareAndDelete::Mismatch,
            Some(_) => {
                entries.remove(key);
                CompareAndDelete::Deleted
            }
        };

        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryDirectory {
    users: Mutex<HashMap<Uuid, DirectoryUser>>,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
}

impl MemoryDirectory {
    pub fn seed(&self, user_id: Uuid) -> DirectoryUser {
        let user = DirectoryUser::new(user_id, format!("sync-{}", user_id.simple()));
        self.users.lock().unwrap().insert(user_id, user.clone());
        user
    }

    pub fn get(&self, user_id: Uuid) -> Option<DirectoryUser> {
        self.users.lock().unwrap().get(&user_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn fail_creates(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    fn modify(&self, user_id: Uuid, f: impl FnOnce(&mut DirectoryUser)) -> AppResult<DirectoryUser> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))?;
        f(user);
        Ok(user.clone())
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn create_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        if injected(&self.fail_create) {
            return Err(AppError::DatabaseError("insert failed".to_string()));
        }
        Ok(self.seed(user_id))
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<DirectoryUser>> {
        Ok(self.get(user_id))
    }

    async fn archive_user(&self, user_id: Uuid, delay: Duration) -> AppResult<DirectoryUser> {
        let delay = chrono::Duration::from_std(delay).unwrap();
        self.modify(user_id, |u| u.archive(delay))
    }

    async fn restore_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        self.modify(user_id, |u| u.restore())
    }

    async fn block_user(&self, user_id: Uuid, blocked: bool) -> AppResult<DirectoryUser> {
        self.modify(user_id, |u| u.set_blocked(blocked))
    }

    async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        if injected(&self.fail_delete) {
            return Err(AppError::DatabaseError("delete failed".to_string()));
        }
        self.users
            .lock()
            .unwrap()
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))
    }
}

// ---------------------------------------------------------------------------
// Sent emails
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemorySentEmails {
    records: Mutex<Vec<SentEmailRecord>>,
    fail_append: AtomicBool,
}

impl MemorySentEmails {
    /// 가장 오래된 기록의 발송 시각을 `by` 만큼 과거로 옮깁니다.
    pub fn age_oldest(&self, by: Duration) {
        let by = chrono::Duration::from_std(by).unwrap();
        let mut records = self.records.lock().unwrap();
        if let Some(oldest) = records.iter_mut().min_by_key(|r| r.sent_at) {
            oldest.sent_at = oldest.sent_at - by;
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn fail_appends(&self) {
        self.fail_append.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SentEmailStore for MemorySentEmails {
    async fn count_since(&self, user_id: Uuid, since: DateTime<Utc>) -> AppResult<u64> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|r| r.user_id == user_id && r.sent_at >= since).count() as u64)
    }

    async fn append(&self, user_id: Uuid, email: &str) -> AppResult<SentEmailRecord> {
        if injected(&self.fail_append) {
            return Err(AppError::DatabaseError("insert failed".to_string()));
        }
        let record = SentEmailRecord::new(user_id, email);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeIdentity {
    accounts: Mutex<Vec<AuthAccount>>,
    passwords: Mutex<HashMap<String, (String, Uuid)>>,
    deleted: Mutex<Vec<Uuid>>,
    create_error: Mutex<Option<AppError>>,
    fail_lookup: AtomicBool,
    fail_delete: AtomicBool,
    fail_email_update: AtomicBool,
    fail_verification_update: AtomicBool,
}

impl FakeIdentity {
    pub fn add_local(&self, user_id: Uuid, email: &str, password: &str, verified: bool) {
        self.accounts.lock().unwrap().push(AuthAccount {
            id: Uuid::new_v4().to_string(),
            user_id,
            provider: AuthProvider::Local,
            provider_id: None,
            email: email.to_string(),
            is_verified: verified,
        });
        self.passwords
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), user_id));
    }

    pub fn add_oauth(&self, user_id: Uuid, provider: AuthProvider, provider_id: &str, email: &str, verified: bool) {
        self.accounts.lock().unwrap().push(AuthAccount {
            id: Uuid::new_v4().to_string(),
            user_id,
            provider,
            provider_id: Some(provider_id.to_string()),
            email: email.to_string(),
            is_verified: verified,
        });
    }

    /// 계정 레코드만 지웁니다. 비밀번호 항목은 남습니다.
    pub fn remove_accounts(&self, user_id: Uuid) {
        self.accounts.lock().unwrap().retain(|a| a.user_id != user_id);
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn deleted_accounts(&self) -> Vec<Uuid> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn is_verified(&self, user_id: Uuid) -> bool {
        self.accounts.lock().unwrap().iter().any(|a| a.user_id == user_id && a.is_verified)
    }

    pub fn email_of(&self, user_id: Uuid) -> Option<String> {
        self.local(user_id).map(|a| a.email)
    }

    /// 다음 계정 생성 요청을 `error`로 실패시킵니다.
    pub fn fail_creates(&self, error: AppError) {
        *self.create_error.lock().unwrap() = Some(error);
    }

    pub fn fail_lookups(&self) {
        self.fail_lookup.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn fail_email_updates(&self) {
        self.fail_email_update.store(true, Ordering::SeqCst);
    }

    pub fn fail_verification_updates(&self) {
        self.fail_verification_update.store(true, Ordering::SeqCst);
    }

    fn local(&self, user_id: Uuid) -> Option<AuthAccount> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user_id == user_id && a.provider == AuthProvider::Local)
            .cloned()
    }

    fn take_create_error(&self) -> Option<AppError> {
        self.create_error.lock().unwrap().take()
    }
}

#[async_trait]
impl IdentityClient for FakeIdentity {
    async fn create_local_account(&self, user_id: Uuid, email: &str, password: &str) -> AppResult<CreatedAccount> {
        if let Some(error) = self.take_create_error() {
            return Err(error);
        }
        if self.passwords.lock().unwrap().contains_key(email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        self.add_local(user_id, email, password, false);
        Ok(CreatedAccount { user_id, created_at: Utc::now() })
    }

    async fn create_oauth_account(
        &self,
        user_id: Uuid,
        provider: AuthProvider,
        credential: &OAuthCredential,
    ) -> AppResult<CreatedOAuthAccount> {
        if let Some(error) = self.take_create_error() {
            return Err(error);
        }

        let value = match credential {
            OAuthCredential::AccessToken(token) => token,
            OAuthCredential::AuthorizationCode(code) => code,
        };
        let provider_id = format!("{}-{}", provider, value);
        let email = format!("{}@{}.example", value, provider);
        self.add_oauth(user_id, provider, &provider_id, &email, true);

        Ok(CreatedOAuthAccount {
            user_id,
            provider_id,
            email,
            is_verified: true,
            created_at: Utc::now(),
        })
    }

    async fn find_oauth_account(&self, provider: AuthProvider, provider_id: &str) -> AppResult<Option<AuthAccount>> {
        if injected(&self.fail_lookup) {
            return Err(AppError::ExternalServiceError("identity 요청 실패: timeout".to_string()));
        }

        Ok(self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.provider == provider && a.provider_id.as_deref() == Some(provider_id))
            .cloned())
    }

    async fn find_local_account(&self, user_id: Uuid) -> AppResult<Option<AuthAccount>> {
        Ok(self.local(user_id))
    }

    async fn compare_password(&self, email: &str, password: &str) -> AppResult<PasswordCheck> {
        let passwords = self.passwords.lock().unwrap();
        Ok(match passwords.get(email) {
            Some((stored, user_id)) if stored == password => PasswordCheck { verified: true, user_id: Some(*user_id) },
            _ => PasswordCheck { verified: false, user_id: None },
        })
    }

    async fn update_email(&self, user_id: Uuid, new_email: &str) -> AppResult<()> {
        if injected(&self.fail_email_update) {
            return Err(AppError::ExternalServiceError("identity 응답 503".to_string()));
        }
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.user_id == user_id && a.provider == AuthProvider::Local)
            .ok_or_else(|| AppError::NotFound("account".to_string()))?;
        account.email = new_email.to_string();
        Ok(())
    }

    async fn update_email_verification(&self, user_id: Uuid, verified: bool) -> AppResult<()> {
        if injected(&self.fail_verification_update) {
            return Err(AppError::ExternalServiceError("identity 응답 503".to_string()));
        }
        let mut accounts = self.accounts.lock().unwrap();
        let mut found = false;
        for account in accounts.iter_mut().filter(|a| a.user_id == user_id) {
            account.is_verified = verified;
            found = true;
        }

        if found { Ok(()) } else { Err(AppError::NotFound("account".to_string())) }
    }

    async fn delete_account(&self, user_id: Uuid) -> AppResult<()> {
        if injected(&self.fail_delete) {
            return Err(AppError::ExternalServiceError("identity 응답 503".to_string()));
        }
        self.remove_accounts(user_id);
        self.deleted.lock().unwrap().push(user_id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeProfile {
    profiles: Mutex<HashMap<Uuid, (String, String)>>,
    fail_create: AtomicBool,
    fail_update: AtomicBool,
}

impl FakeProfile {
    pub fn seed(&self, user_id: Uuid, email: &str, sync_code: &str) {
        self.profiles
            .lock()
            .unwrap()
            .insert(user_id, (email.to_string(), sync_code.to_string()));
    }

    pub fn sync_code_of(&self, user_id: Uuid) -> Option<String> {
        self.profiles.lock().unwrap().get(&user_id).map(|(_, sync)| sync.clone())
    }

    pub fn email_of(&self, user_id: Uuid) -> Option<String> {
        self.profiles.lock().unwrap().get(&user_id).map(|(email, _)| email.clone())
    }

    pub fn fail_creates(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn fail_updates(&self) {
        self.fail_update.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfileClient for FakeProfile {
    async fn create_profile(&self, user_id: Uuid, email: &str, sync_code: &str) -> AppResult<ProfileRecord> {
        if injected(&self.fail_create) {
            return Err(AppError::ExternalServiceError("profile 응답 500".to_string()));
        }
        self.profiles
            .lock()
            .unwrap()
            .insert(user_id, (email.to_string(), sync_code.to_string()));
        Ok(ProfileRecord { user_id, created_at: Utc::now() })
    }

    async fn update_email(&self, user_id: Uuid, new_email: &str, sync_code: &str) -> AppResult<()> {
        if injected(&self.fail_update) {
            return Err(AppError::ExternalServiceError("profile 응답 500".to_string()));
        }
        self.profiles
            .lock()
            .unwrap()
            .insert(user_id, (new_email.to_string(), sync_code.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Token issuer
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeTokenIssuer {
    verification_tokens: Mutex<HashMap<String, EmailVerificationClaims>>,
    issued: Mutex<Vec<EmailVerificationClaims>>,
}

impl FakeTokenIssuer {
    pub fn issued_claims(&self) -> Vec<EmailVerificationClaims> {
        self.issued.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenIssuer for FakeTokenIssuer {
    async fn generate_access_token(&self, user_id: Uuid) -> AppResult<String> {
        Ok(format!("access-{}", user_id))
    }

    async fn generate_refresh_token(&self, user_id: Uuid) -> AppResult<String> {
        Ok(format!("refresh-{}", user_id))
    }

    async fn generate_email_verification_token(&self, claims: &EmailVerificationClaims) -> AppResult<String> {
        let token = format!("evt+{}", Uuid::new_v4().simple());
        self.verification_tokens.lock().unwrap().insert(token.clone(), claims.clone());
        self.issued.lock().unwrap().push(claims.clone());
        Ok(token)
    }

    async fn verify_email_verification_token(&self, token: &str) -> AppResult<Option<EmailVerificationClaims>> {
        Ok(self.verification_tokens.lock().unwrap().get(token).cloned())
    }
}

// ---------------------------------------------------------------------------
// OAuth provider / signup API
// ---------------------------------------------------------------------------

pub struct FakeOAuthApi {
    provider: AuthProvider,
    users: HashMap<String, OAuthUserInfo>,
    codes: HashMap<String, String>,
}

impl FakeOAuthApi {
    pub fn new(provider: AuthProvider) -> Self {
        Self { provider, users: HashMap::new(), codes: HashMap::new() }
    }

    pub fn with_user(mut self, access_token: &str, info: OAuthUserInfo) -> Self {
        self.users.insert(access_token.to_string(), info);
        self
    }

    pub fn with_code(mut self, code: &str, access_token: &str) -> Self {
        self.codes.insert(code.to_string(), access_token.to_string());
        self
    }
}

#[async_trait]
impl OAuthApi for FakeOAuthApi {
    fn provider(&self) -> AuthProvider {
        self.provider
    }

    fn login_url(&self, state: &str) -> String {
        format!("https://{}.example.com/authorize?state={}", self.provider, state)
    }

    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        self.codes
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::ExternalServiceError("invalid_grant".to_string()))
    }

    async fn user_info(&self, access_token: &str) -> AppResult<OAuthUserInfo> {
        self.users
            .get(access_token)
            .cloned()
            .ok_or_else(|| AppError::ExternalServiceError("401 from provider".to_string()))
    }
}

/// 가입 요청마다 `FakeIdentity`에 OAuth 계정을 추가하는 원격 회원가입 API
pub struct FakeSignupApi {
    identity: Arc<FakeIdentity>,
    users: HashMap<String, OAuthUserInfo>,
    calls: AtomicUsize,
}

impl FakeSignupApi {
    pub fn new(identity: Arc<FakeIdentity>) -> Self {
        Self { identity, users: HashMap::new(), calls: AtomicUsize::new(0) }
    }

    pub fn with_user(mut self, access_token: &str, info: OAuthUserInfo) -> Self {
        self.users.insert(access_token.to_string(), info);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignupApi for FakeSignupApi {
    async fn oauth_signup(&self, provider: AuthProvider, access_token: &str) -> AppResult<OAuthSignupResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let info = self.users
            .get(access_token)
            .ok_or_else(|| AppError::AuthenticationError("signup 인증 거부".to_string()))?;

        let user_id = Uuid::new_v4();
        self.identity.add_oauth(user_id, provider, &info.provider_id, &info.email, info.email_verified);

        Ok(OAuthSignupResult {
            user_id,
            provider,
            provider_id: info.provider_id.clone(),
            email: info.email.clone(),
            is_verified: info.email_verified,
            created_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingPublisher {
    user_events: Mutex<Vec<UserEvent>>,
    mail_events: Mutex<Vec<MailEvent>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    pub fn user_events(&self) -> Vec<UserEvent> {
        self.user_events.lock().unwrap().clone()
    }

    pub fn mail_events(&self) -> Vec<MailEvent> {
        self.mail_events.lock().unwrap().clone()
    }

    pub fn fail_publishes(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserEventPublisher for RecordingPublisher {
    async fn publish_user_event(&self, event: &UserEvent) -> AppResult<()> {
        if injected(&self.fail) {
            return Err(AppError::RedisError("XADD failed".to_string()));
        }
        self.user_events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

#[async_trait]
impl MailEventPublisher for RecordingPublisher {
    async fn publish_mail_event(&self, event: &MailEvent) -> AppResult<()> {
        if injected(&self.fail) {
            return Err(AppError::RedisError("XADD failed".to_string()));
        }
        self.mail_events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
