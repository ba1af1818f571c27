//! # Redis 클라이언트
//!
//! 로그인 코드 저장소와 이벤트 스트림이 공유하는 Redis 래퍼입니다.
//!
//! ## 제공 기능
//!
//! - **만료 키 저장**: `SET key value EX ttl`
//! - **원자적 비교 후 삭제**: Lua 스크립트 하나로 `GET` + 비교 + `DEL`을 수행합니다.
//!   Redis는 스크립트를 단일 명령처럼 실행하므로 두 요청이 동시에 같은 키를 소비할 수 없습니다.
//! - **스트림 발행**: `XADD stream * field value ...`
//!
//! ## 연결 관리
//!
//! 요청마다 멀티플렉싱된 연결을 얻어 사용합니다. 하나의 TCP 연결에서
//! 여러 동시 요청이 파이프라이닝됩니다.

use once_cell::sync::Lazy;
use redis::{AsyncCommands, Client, Script};
use std::time::Duration;

/// 키의 값이 기대값과 같을 때만 삭제합니다.
///
/// 반환값: `0` 키 없음, `-1` 값 불일치(삭제하지 않음), `1` 삭제됨
static COMPARE_AND_DELETE: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        local current = redis.call('GET', KEYS[1])
        if not current then
            return 0
        end
        if current ~= ARGV[1] then
            return -1
        end
        redis.call('DEL', KEYS[1])
        return 1
        "#,
    )
});

/// 비교 후 삭제 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareAndDelete {
    /// 키가 없거나 이미 만료됨
    Missing,
    /// 키는 있으나 값이 다름. 키는 그대로 남습니다.
    Mismatch,
    /// 값이 일치하여 삭제됨
    Deleted,
}

/// Redis 클라이언트 래퍼
///
/// ```rust,ignore
/// let redis = RedisClient::new(&DatabaseConfig::redis_url()).await?;
///
/// redis.set_with_expiry("login_code:ab12", "user-id", Duration::from_secs(300)).await?;
/// let outcome = redis.compare_and_delete("login_code:ab12", "user-id").await?;
/// assert_eq!(outcome, CompareAndDelete::Deleted);
/// ```
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// 클라이언트를 생성하고 `PING`으로 서버 가용성을 확인합니다.
    pub async fn new(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    pub async fn ping(&self) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await
    }

    /// 만료 시간과 함께 문자열 값을 저장합니다.
    ///
    /// Redis의 `EX`는 0을 허용하지 않으므로 1초 미만의 TTL은 1초로 올림합니다.
    pub async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let seconds = ttl.as_secs().max(1);
        conn.set_ex(key, value, seconds).await
    }

    /// 키의 값이 `expected`와 같으면 원자적으로 삭제합니다.
    pub async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<CompareAndDelete, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: i64 = COMPARE_AND_DELETE
            .key(key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await?;

        Ok(match result {
            1 => CompareAndDelete::Deleted,
            -1 => CompareAndDelete::Mismatch,
            _ => CompareAndDelete::Missing,
        })
    }

    /// 스트림에 엔트리를 추가하고 생성된 엔트리 ID를 반환합니다.
    pub async fn xadd(&self, stream: &str, fields: &[(&str, String)]) -> Result<String, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let mut cmd = redis::cmd("XADD");
        cmd.arg(stream).arg("*");
        for (field, value) in fields {
            cmd.arg(*field).arg(value);
        }

        cmd.query_async::<String>(&mut conn).await
    }
}
