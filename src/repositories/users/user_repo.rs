//! # 사용자 디렉터리 리포지토리
//!
//! 계정의 정규 레코드([`DirectoryUser`])를 MongoDB `users` 컬렉션에 저장합니다.
//! 회원가입 사가의 첫 단계로 레코드를 만들며, 이때 sync code를 발급합니다.
//!
//! ## 저장 형식
//!
//! 문서 `_id`는 UUID 문자열, 시각은 BSON DateTime 으로 저장됩니다.
//!
//! ```json
//! {
//!   "_id": "5b0f3c1e-...",
//!   "sync_code": "q3X9...",
//!   "status": "archived",
//!   "archived_at": ISODate("..."),
//!   "delete_after": ISODate("..."),
//!   "created_at": ISODate("..."),
//!   "updated_at": ISODate("...")
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::users::{DirectoryUser, UserStatus},
    utils::string_utils::{generate_random_token, DEFAULT_TOKEN_BYTES},
};

const COLLECTION: &str = "users";

/// 디렉터리 저장소 추상화
///
/// 모든 변경 연산은 대상 사용자가 없으면 `AppError::NotFound`를 반환합니다.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 새 사용자를 만들고 sync code를 발급합니다.
    async fn create_user(&self, user_id: Uuid) -> AppResult<DirectoryUser>;

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<DirectoryUser>>;

    /// 보관 상태로 전환하고 `delay` 후 삭제되도록 예약합니다.
    async fn archive_user(&self, user_id: Uuid, delay: Duration) -> AppResult<DirectoryUser>;

    async fn restore_user(&self, user_id: Uuid) -> AppResult<DirectoryUser>;

    async fn block_user(&self, user_id: Uuid, blocked: bool) -> AppResult<DirectoryUser>;

    /// 레코드를 즉시 영구 삭제합니다.
    async fn delete_user(&self, user_id: Uuid) -> AppResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    sync_code: String,
    status: UserStatus,
    #[serde(default)]
    archived_at: Option<bson::DateTime>,
    #[serde(default)]
    delete_after: Option<bson::DateTime>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_bson_time(time: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(time.timestamp_millis())
}

fn from_bson_time(time: bson::DateTime) -> AppResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(time.timestamp_millis())
        .ok_or_else(|| AppError::DatabaseError(format!("잘못된 시각 값: {}", time)))
}

impl From<&DirectoryUser> for UserDocument {
    fn from(user: &DirectoryUser) -> Self {
        Self {
            id: user.id.to_string(),
            sync_code: user.sync_code.clone(),
            status: user.status,
            archived_at: user.archived_at.map(to_bson_time),
            delete_after: user.delete_after.map(to_bson_time),
            created_at: to_bson_time(user.created_at),
            updated_at: to_bson_time(user.updated_at),
        }
    }
}

impl TryFrom<UserDocument> for DirectoryUser {
    type Error = AppError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&document.id)
            .map_err(|e| AppError::DatabaseError(format!("잘못된 사용자 ID '{}': {}", document.id, e)))?;

        Ok(Self {
            id,
            sync_code: document.sync_code,
            status: document.status,
            archived_at: document.archived_at.map(from_bson_time).transpose()?,
            delete_after: document.delete_after.map(from_bson_time).transpose()?,
            created_at: from_bson_time(document.created_at)?,
            updated_at: from_bson_time(document.updated_at)?,
        })
    }
}

pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<UserDocument> {
        self.db.collection::<UserDocument>(COLLECTION)
    }

    /// `$set` 갱신을 적용하고 갱신된 사용자를 반환합니다.
    async fn update(&self, user_id: Uuid, set: Document) -> AppResult<DirectoryUser> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": user_id.to_string() }, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))?;

        DirectoryUser::try_from(updated)
    }

    /// 스위퍼 조회와 관리 화면 정렬에 쓰이는 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let delete_after_index = IndexModel::builder()
            .keys(doc! { "status": 1, "delete_after": 1 })
            .options(IndexOptions::builder()
                .name("status_delete_after".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([delete_after_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MongoUserRepository {
    async fn create_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        let user = DirectoryUser::new(user_id, generate_random_token(DEFAULT_TOKEN_BYTES));

        self.collection()
            .insert_one(UserDocument::from(&user))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::debug!("디렉터리 사용자 생성: {}", user_id);
        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<DirectoryUser>> {
        self.collection()
            .find_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .map(DirectoryUser::try_from)
            .transpose()
    }

    async fn archive_user(&self, user_id: Uuid, delay: Duration) -> AppResult<DirectoryUser> {
        let delay = chrono::Duration::from_std(delay)
            .map_err(|e| AppError::InternalError(format!("잘못된 삭제 유예 시간: {}", e)))?;
        let now = Utc::now();

        self.update(user_id, doc! {
            "status": UserStatus::Archived.as_str(),
            "archived_at": to_bson_time(now),
            "delete_after": to_bson_time(now + delay),
            "updated_at": to_bson_time(now),
        }).await
    }

    async fn restore_user(&self, user_id: Uuid) -> AppResult<DirectoryUser> {
        self.update(user_id, doc! {
            "status": UserStatus::Active.as_str(),
            "archived_at": Bson::Null,
            "delete_after": Bson::Null,
            "updated_at": to_bson_time(Utc::now()),
        }).await
    }

    async fn block_user(&self, user_id: Uuid, blocked: bool) -> AppResult<DirectoryUser> {
        let status = if blocked { UserStatus::Blocked } else { UserStatus::Active };

        self.update(user_id, doc! {
            "status": status.as_str(),
            "updated_at": to_bson_time(Utc::now()),
        }).await
    }

    async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let result = self.collection()
            .delete_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)));
        }

        Ok(())
    }
}
