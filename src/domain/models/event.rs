//! 이벤트 버스로 발행되는 메시지 모델

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserEventType {
    Deleted,
    Archived,
    Restored,
    Blocked,
    Unblocked,
}

impl UserEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserEventType::Deleted => "user_deleted",
            UserEventType::Archived => "user_archived",
            UserEventType::Restored => "user_restored",
            UserEventType::Blocked => "user_blocked",
            UserEventType::Unblocked => "user_unblocked",
        }
    }
}

/// 사용자 생명주기 이벤트
///
/// 삭제 이벤트를 제외한 모든 이벤트는 의존 서비스가 레코드를 맞출 수 있도록 sync code를 포함합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEvent {
    pub event_type: UserEventType,
    pub user_id: Uuid,
    pub sync_code: Option<String>,
    pub event_time: DateTime<Utc>,
}

impl UserEvent {
    fn new(event_type: UserEventType, user_id: Uuid, sync_code: Option<String>) -> Self {
        Self { event_type, user_id, sync_code, event_time: Utc::now() }
    }

    pub fn deleted(user_id: Uuid) -> Self {
        Self::new(UserEventType::Deleted, user_id, None)
    }

    pub fn archived(user_id: Uuid, sync_code: &str) -> Self {
        Self::new(UserEventType::Archived, user_id, Some(sync_code.to_string()))
    }

    pub fn restored(user_id: Uuid, sync_code: &str) -> Self {
        Self::new(UserEventType::Restored, user_id, Some(sync_code.to_string()))
    }

    pub fn blocked(user_id: Uuid, sync_code: &str) -> Self {
        Self::new(UserEventType::Blocked, user_id, Some(sync_code.to_string()))
    }

    pub fn unblocked(user_id: Uuid, sync_code: &str) -> Self {
        Self::new(UserEventType::Unblocked, user_id, Some(sync_code.to_string()))
    }
}

/// 인증 메일 발송 요청 이벤트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailEvent {
    pub email: String,
    pub verification_link: String,
    pub event_time: DateTime<Utc>,
}

impl MailEvent {
    pub fn email_verification(email: &str, verification_link: String) -> Self {
        Self {
            email: email.to_string(),
            verification_link,
            event_time: Utc::now(),
        }
    }
}
