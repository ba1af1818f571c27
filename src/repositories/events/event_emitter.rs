//! # 이벤트 발행기
//!
//! 사용자 생명주기 이벤트와 인증 메일 발송 이벤트를 메시지 버스로 발행합니다.
//! 구현체는 Redis Streams(`XADD`)를 사용하며, 스트림 엔트리는 소비자 그룹이
//! 확인(ACK)할 때까지 남아 있으므로 소비자가 잠시 내려가도 이벤트가 유실되지 않습니다.
//!
//! 발행 실패는 조용히 무시하지 않고 에러로 반환합니다. 호출자가 로그를 남기거나 전파합니다.
//!
//! ## 스트림 엔트리 형식
//!
//! ```text
//! XADD user-events * type user_archived user_id <uuid> sync_code <code> event_time <rfc3339>
//! XADD mail-events * email a@x.com verification_link https://... event_time <rfc3339>
//! ```

use std::sync::Arc;
use async_trait::async_trait;
use crate::{
    caching::RedisClient,
    core::errors::{AppError, AppResult},
    domain::models::{MailEvent, UserEvent},
};

#[async_trait]
pub trait UserEventPublisher: Send + Sync {
    async fn publish_user_event(&self, event: &UserEvent) -> AppResult<()>;
}

#[async_trait]
pub trait MailEventPublisher: Send + Sync {
    async fn publish_mail_event(&self, event: &MailEvent) -> AppResult<()>;
}

pub struct RedisStreamPublisher {
    redis: Arc<RedisClient>,
    user_stream: String,
    mail_stream: String,
}

impl RedisStreamPublisher {
    pub fn new(redis: Arc<RedisClient>, user_stream: String, mail_stream: String) -> Self {
        Self { redis, user_stream, mail_stream }
    }
}

fn user_event_fields(event: &UserEvent) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("type", event.event_type.as_str().to_string()),
        ("user_id", event.user_id.to_string()),
        ("event_time", event.event_time.to_rfc3339()),
    ];
    if let Some(sync_code) = &event.sync_code {
        fields.push(("sync_code", sync_code.clone()));
    }
    fields
}

fn mail_event_fields(event: &MailEvent) -> Vec<(&'static str, String)> {
    vec![
        ("email", event.email.clone()),
        ("verification_link", event.verification_link.clone()),
        ("event_time", event.event_time.to_rfc3339()),
    ]
}

#[async_trait]
impl UserEventPublisher for RedisStreamPublisher {
    async fn publish_user_event(&self, event: &UserEvent) -> AppResult<()> {
        let entry_id = self.redis
            .xadd(&self.user_stream, &user_event_fields(event))
            .await
            .map_err(|e| AppError::RedisError(format!("사용자 이벤트 발행 실패: {}", e)))?;

        log::info!("사용자 이벤트 발행 - {} {} ({})", event.event_type.as_str(), event.user_id, entry_id);
        Ok(())
    }
}

#[async_trait]
impl MailEventPublisher for RedisStreamPublisher {
    async fn publish_mail_event(&self, event: &MailEvent) -> AppResult<()> {
        let entry_id = self.redis
            .xadd(&self.mail_stream, &mail_event_fields(event))
            .await
            .map_err(|e| AppError::RedisError(format!("메일 이벤트 발행 실패: {}", e)))?;

        log::info!("인증 메일 이벤트 발행 ({})", entry_id);
        Ok(())
    }
}
