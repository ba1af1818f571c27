use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 인증 메일 발송 기록
///
/// 추가만 되는 감사 로그입니다. 최근 발송 횟수를 세어 발송 한도를 적용하는 데 쓰입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentEmailRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub sent_at: DateTime<Utc>,
}

impl SentEmailRecord {
    pub fn new(user_id: Uuid, email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            email: email.to_string(),
            sent_at: Utc::now(),
        }
    }
}
