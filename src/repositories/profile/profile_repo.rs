//! # Profile 서비스 어댑터
//!
//! 프로필 레코드는 사용자 ID와 디렉터리의 sync code로 묶입니다.
//! 프로필 서비스는 sync code가 디렉터리 레코드와 일치할 때만 변경을 받아들입니다.

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;
use crate::{
    core::errors::AppResult,
    domain::models::ProfileRecord,
    repositories::remote::RemoteApi,
};

#[async_trait]
pub trait ProfileClient: Send + Sync {
    async fn create_profile(&self, user_id: Uuid, email: &str, sync_code: &str) -> AppResult<ProfileRecord>;

    async fn update_email(&self, user_id: Uuid, new_email: &str, sync_code: &str) -> AppResult<()>;
}

pub struct HttpProfileClient {
    api: RemoteApi,
}

impl HttpProfileClient {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProfileClient for HttpProfileClient {
    async fn create_profile(&self, user_id: Uuid, email: &str, sync_code: &str) -> AppResult<ProfileRecord> {
        let request = self.api
            .post("/v1/profiles")
            .json(&json!({ "user_id": user_id, "email": email, "sync_code": sync_code }));

        self.api.send_json(request).await
    }

    async fn update_email(&self, user_id: Uuid, new_email: &str, sync_code: &str) -> AppResult<()> {
        let request = self.api
            .put(&format!("/v1/profiles/{}/email", user_id))
            .json(&json!({ "email": new_email, "sync_code": sync_code }));

        self.api.send_empty(request).await
    }
}
