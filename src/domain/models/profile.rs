use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 원격 프로필 서비스의 생성 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
