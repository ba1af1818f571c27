//! Redis 기반 휘발성 저장소 (로그인 코드, 이벤트 스트림)

pub mod redis;

pub use self::redis::{CompareAndDelete, RedisClient};
