//! 인증 메일 발송 기록 리포지토리 (MongoDB `sent_emails` 컬렉션)

use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{self, doc},
    options::IndexOptions,
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::emails::SentEmailRecord,
};

const COLLECTION: &str = "sent_emails";

#[async_trait]
pub trait SentEmailStore: Send + Sync {
    /// `since` 이후 해당 사용자에게 발송된 인증 메일 수
    async fn count_since(&self, user_id: Uuid, since: DateTime<Utc>) -> AppResult<u64>;

    async fn append(&self, user_id: Uuid, email: &str) -> AppResult<SentEmailRecord>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SentEmailDocument {
    #[serde(rename = "_id")]
    id: String,
    user_id: String,
    email: String,
    sent_at: bson::DateTime,
}

pub struct MongoSentEmailRepository {
    db: Arc<Database>,
}

impl MongoSentEmailRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<SentEmailDocument> {
        self.db.collection::<SentEmailDocument>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let window_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "sent_at": -1 })
            .options(IndexOptions::builder()
                .name("user_id_sent_at".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([window_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SentEmailStore for MongoSentEmailRepository {
    async fn count_since(&self, user_id: Uuid, since: DateTime<Utc>) -> AppResult<u64> {
        self.collection()
            .count_documents(doc! {
                "user_id": user_id.to_string(),
                "sent_at": { "$gte": bson::DateTime::from_millis(since.timestamp_millis()) },
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn append(&self, user_id: Uuid, email: &str) -> AppResult<SentEmailRecord> {
        let record = SentEmailRecord::new(user_id, email);

        self.collection()
            .insert_one(SentEmailDocument {
                id: record.id.to_string(),
                user_id: record.user_id.to_string(),
                email: record.email.clone(),
                sent_at: bson::DateTime::from_millis(record.sent_at.timestamp_millis()),
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(record)
    }
}
