//! # 일회용 로그인 코드 관리자
//!
//! 로컬 로그인, OAuth 로그인, 이메일 인증이 공유하는 코드 발급/검증기입니다.
//!
//! ## 코드 수명
//!
//! ```text
//! issue_code(user) ──► [key = prefix + sha256(code)] ──TTL──► 만료
//!                              │
//!        validate_code(user, code) ── 최초 1회만 true, 이후 false
//! ```
//!
//! 만료된 코드와 발급된 적 없는 코드는 구분되지 않습니다(`Ok(false)`).
//! 다른 사용자에게 발급된 코드는 `AuthenticationError`이며 코드는 소비되지 않습니다.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use crate::{
    caching::CompareAndDelete,
    core::errors::{AppError, AppResult},
    repositories::codes::CodeStore,
    utils::string_utils::{generate_random_token, sha256_hex, DEFAULT_TOKEN_BYTES},
};

pub struct LoginCodeManager {
    store: Arc<dyn CodeStore>,
    ttl: Duration,
    prefix: String,
}

impl LoginCodeManager {
    pub fn new(store: Arc<dyn CodeStore>, ttl: Duration, prefix: impl Into<String>) -> Self {
        Self { store, ttl, prefix: prefix.into() }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn key(&self, code: &str) -> String {
        format!("{}{}", self.prefix, sha256_hex(code))
    }

    /// 새 코드를 발급합니다. 반환된 평문 코드는 저장되지 않습니다.
    pub async fn issue_code(&self, user_id: Uuid) -> AppResult<String> {
        let code = generate_random_token(DEFAULT_TOKEN_BYTES);

        self.store
            .put(&self.key(&code), &user_id.to_string(), self.ttl)
            .await?;

        log::debug!("로그인 코드 발급: {} (TTL {}초)", user_id, self.ttl.as_secs());
        Ok(code)
    }

    /// 코드를 검증하고 성공 시 소비합니다.
    pub async fn validate_code(&self, user_id: Uuid, code: &str) -> AppResult<bool> {
        if code.is_empty() {
            return Ok(false);
        }

        match self.store.take_if_owner(&self.key(code), &user_id.to_string()).await? {
            CompareAndDelete::Deleted => Ok(true),
            CompareAndDelete::Missing => Ok(false),
            CompareAndDelete::Mismatch => {
                log::warn!("다른 사용자의 로그인 코드 사용 시도: {}", user_id);
                Err(AppError::AuthenticationError("코드 소유자가 일치하지 않습니다".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryCodeStore;
    use futures_util::future::join_all;

    fn manager(store: Arc<MemoryCodeStore>, ttl: Duration) -> LoginCodeManager {
        LoginCodeManager::new(store, ttl, "login_code:")
    }

    #[actix_web::test]
    async fn test_code_is_single_use() {
        let codes = manager(Arc::new(MemoryCodeStore::default()), Duration::from_secs(300));
        let user_id = Uuid::new_v4();

        let code = codes.issue_code(user_id).await.unwrap();

        assert!(codes.validate_code(user_id, &code).await.unwrap());
        assert!(!codes.validate_code(user_id, &code).await.unwrap());
    }

    #[actix_web::test]
    async fn test_concurrent_validation_succeeds_at_most_once() {
        let codes = manager(Arc::new(MemoryCodeStore::default()), Duration::from_secs(300));
        let user_id = Uuid::new_v4();
        let code = codes.issue_code(user_id).await.unwrap();

        let results = join_all((0..32).map(|_| codes.validate_code(user_id, &code))).await;

        let successes = results.iter().filter(|r| matches!(r, Ok(true))).count();
        assert_eq!(successes, 1);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[actix_web::test]
    async fn test_expired_code_is_indistinguishable_from_unknown() {
        let store = Arc::new(MemoryCodeStore::default());
        let codes = manager(store.clone(), Duration::from_secs(300));
        let user_id = Uuid::new_v4();

        let code = codes.issue_code(user_id).await.unwrap();
        store.expire_all();

        assert!(!codes.validate_code(user_id, &code).await.unwrap());
        assert!(!codes.validate_code(user_id, "never-issued").await.unwrap());
    }

    #[actix_web::test]
    async fn test_foreign_code_is_rejected_and_kept() {
        let codes = manager(Arc::new(MemoryCodeStore::default()), Duration::from_secs(300));
        let owner = Uuid::new_v4();
        let code = codes.issue_code(owner).await.unwrap();

        let result = codes.validate_code(Uuid::new_v4(), &code).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));

        // 소유자는 여전히 사용할 수 있음
        assert!(codes.validate_code(owner, &code).await.unwrap());
    }

    #[actix_web::test]
    async fn test_store_keeps_only_hashed_keys() {
        let store = Arc::new(MemoryCodeStore::default());
        let codes = manager(store.clone(), Duration::from_secs(300));

        let code = codes.issue_code(Uuid::new_v4()).await.unwrap();

        let keys = store.keys();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with("login_code:"));
        assert!(!keys[0].contains(&code));
    }

    #[actix_web::test]
    async fn test_unreachable_store_is_internal_failure() {
        let store = Arc::new(MemoryCodeStore::default());
        store.fail_next();
        let codes = manager(store, Duration::from_secs(300));

        let error = codes.issue_code(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(error.kind(), crate::core::errors::ErrorKind::InternalFailure);
    }
}
