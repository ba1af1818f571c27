//! # Token 서비스 어댑터
//!
//! 액세스/리프레시 토큰과 이메일 인증 토큰의 서명·검증은 원격 Token 서비스가 담당합니다.
//! 이 서비스는 서명 알고리즘을 알지 못하며 토큰을 불투명 문자열로만 다룹니다.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use crate::{
    core::errors::{AppError, AppResult},
    domain::models::EmailVerificationClaims,
    repositories::remote::RemoteApi,
};

#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn generate_access_token(&self, user_id: Uuid) -> AppResult<String>;

    async fn generate_refresh_token(&self, user_id: Uuid) -> AppResult<String>;

    async fn generate_email_verification_token(&self, claims: &EmailVerificationClaims) -> AppResult<String>;

    /// 이메일 인증 토큰을 검증합니다.
    ///
    /// 서명이 틀렸거나 만료된 토큰은 에러가 아니라 `Ok(None)` 입니다.
    async fn verify_email_verification_token(&self, token: &str) -> AppResult<Option<EmailVerificationClaims>>;
}

#[derive(Debug, Deserialize)]
struct IssuedToken {
    token: String,
}

#[derive(Debug, Deserialize)]
struct VerificationResult {
    valid: bool,
    #[serde(default)]
    user_id: Option<Uuid>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl VerificationResult {
    fn into_claims(self) -> Option<EmailVerificationClaims> {
        if !self.valid {
            return None;
        }

        Some(EmailVerificationClaims {
            user_id: self.user_id?,
            email: self.email?,
            code: self.code?,
        })
    }
}

pub struct HttpTokenIssuer {
    api: RemoteApi,
}

impl HttpTokenIssuer {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }

    async fn issue(&self, path: &str, body: serde_json::Value) -> AppResult<String> {
        let issued: IssuedToken = self.api.send_json(self.api.post(path).json(&body)).await?;
        Ok(issued.token)
    }
}

#[async_trait]
impl TokenIssuer for HttpTokenIssuer {
    async fn generate_access_token(&self, user_id: Uuid) -> AppResult<String> {
        self.issue("/v1/tokens/access", json!({ "user_id": user_id })).await
    }

    async fn generate_refresh_token(&self, user_id: Uuid) -> AppResult<String> {
        self.issue("/v1/tokens/refresh", json!({ "user_id": user_id })).await
    }

    async fn generate_email_verification_token(&self, claims: &EmailVerificationClaims) -> AppResult<String> {
        self.issue("/v1/tokens/email-verification", json!(claims)).await
    }

    async fn verify_email_verification_token(&self, token: &str) -> AppResult<Option<EmailVerificationClaims>> {
        let request = self.api
            .post("/v1/tokens/email-verification/verify")
            .json(&json!({ "token": token }));

        match self.api.send_json::<VerificationResult>(request).await {
            Ok(result) => Ok(result.into_claims()),
            Err(AppError::ValidationError(_)) | Err(AppError::AuthenticationError(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
