//! 디렉터리 사용자 엔티티
//!
//! 계정의 정규(canonical) 레코드입니다. 사용자 ID, 상태, 동기화 코드(sync code),
//! 지연 삭제 일정을 보관하며, 이 서비스의 디렉터리 저장소만 소유합니다.
//!
//! ## 상태 전이
//!
//! ```text
//!            archive(delay)            block(true)
//! Active ─────────────────► Archived   Active ─────────► Blocked
//!   ▲                          │         ▲                  │
//!   └──────── restore ─────────┘         └── block(false) ──┘
//! ```
//!
//! 보관된 사용자는 `delete_after`가 지나면 외부 스위퍼가 영구 삭제합니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Archived,
    Blocked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Archived => "archived",
            UserStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: Uuid,

    /// 프로필 등 의존 서비스와 레코드를 맞추기 위한 불투명 토큰
    pub sync_code: String,

    pub status: UserStatus,

    pub archived_at: Option<DateTime<Utc>>,

    /// 이 시각 이후 영구 삭제 대상
    pub delete_after: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl DirectoryUser {
    pub fn new(id: Uuid, sync_code: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            sync_code,
            status: UserStatus::Active,
            archived_at: None,
            delete_after: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn archive(&mut self, delay: Duration) {
        let now = Utc::now();
        self.status = UserStatus::Archived;
        self.archived_at = Some(now);
        self.delete_after = Some(now + delay);
        self.updated_at = now;
    }

    pub fn restore(&mut self) {
        self.status = UserStatus::Active;
        self.archived_at = None;
        self.delete_after = None;
        self.updated_at = Utc::now();
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.status = if blocked { UserStatus::Blocked } else { UserStatus::Active };
        self.updated_at = Utc::now();
    }
}
