//! 사용자 관리 요청/응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use crate::domain::entities::{DirectoryUser, UserStatus};

/// 디렉터리 사용자 응답 (sync code는 노출하지 않음)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub status: UserStatus,
    pub archived_at: Option<DateTime<Utc>>,
    pub delete_after: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DirectoryUser> for UserResponse {
    fn from(user: DirectoryUser) -> Self {
        Self {
            id: user.id,
            status: user.status,
            archived_at: user.archived_at,
            delete_after: user.delete_after,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeEmailRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}
