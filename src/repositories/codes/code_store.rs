//! # 로그인 코드 저장소
//!
//! `key -> user_id` 매핑을 TTL과 함께 보관하는 일회용 코드 저장소입니다.
//! 키는 호출자([`crate::services::auth::LoginCodeManager`])가 코드의 SHA-256 해시로 만들기 때문에
//! 저장소에는 평문 코드가 남지 않습니다.
//!
//! ## 원자성
//!
//! [`CodeStore::take_if_owner`]는 조회, 소유자 비교, 삭제를 하나의 원자적 연산으로 수행해야 합니다.
//! 같은 코드를 두 요청이 동시에 검증해도 최대 하나만 `Deleted`를 받습니다.
//! Redis 구현은 Lua 스크립트로 이를 보장합니다.

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use crate::caching::{CompareAndDelete, RedisClient};
use crate::core::errors::{AppError, AppResult};

#[async_trait]
pub trait CodeStore: Send + Sync {
    /// 코드 키를 사용자 ID에 매핑하고 TTL 후 만료시킵니다.
    async fn put(&self, key: &str, user_id: &str, ttl: Duration) -> AppResult<()>;

    /// 키가 `user_id`에 매핑되어 있으면 삭제합니다.
    ///
    /// 다른 사용자에 매핑된 키는 삭제하지 않고 `Mismatch`를 반환합니다.
    async fn take_if_owner(&self, key: &str, user_id: &str) -> AppResult<CompareAndDelete>;
}

pub struct RedisCodeStore {
    redis: Arc<RedisClient>,
}

impl RedisCodeStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn put(&self, key: &str, user_id: &str, ttl: Duration) -> AppResult<()> {
        self.redis
            .set_with_expiry(key, user_id, ttl)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn take_if_owner(&self, key: &str, user_id: &str) -> AppResult<CompareAndDelete> {
        self.redis
            .compare_and_delete(key, user_id)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}
