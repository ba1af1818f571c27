//! # 원격 서비스 HTTP 클라이언트 공통부
//!
//! Identity / Profile / Token 서비스와 원격 회원가입 API 클라이언트가 공유하는
//! `reqwest` 래퍼입니다. 원격 응답 상태 코드를 서비스 에러 분류로 변환합니다.
//!
//! | 원격 상태 | AppError |
//! |-----------|----------|
//! | 400, 422 | `ValidationError` |
//! | 401, 403 | `AuthenticationError` |
//! | 404 | `NotFound` |
//! | 409 | `ConflictError` |
//! | 429 | `TooManyRequests` |
//! | 그 외, 전송 실패 | `ExternalServiceError` |
//!
//! 원격 응답 본문은 로그로만 남기고 에러 메시지에는 고정 문구를 씁니다.
//! 재시도나 백오프는 하지 않습니다. 타임아웃은 `REMOTE_TIMEOUT_SECONDS`로 설정합니다.

use std::time::Duration;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use crate::core::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct RemoteApi {
    client: Client,
    base_url: String,
    service: &'static str,
}

impl RemoteApi {
    pub fn new(service: &'static str, base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("{} HTTP 클라이언트 생성 실패: {}", service, e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// 요청을 보내고 성공 응답 본문을 역직렬화합니다.
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.send(request).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 응답 파싱 실패: {}", self.service, e)))
    }

    /// 요청을 보내고 본문은 버립니다.
    pub async fn send_empty(&self, request: RequestBuilder) -> AppResult<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 요청 실패: {}", self.service, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("{} 오류 응답 {}: {}", self.service, status, body);
        Err(status_error(self.service, status))
    }
}

/// 원격 오류 상태를 에러 분류로 변환합니다.
pub(crate) fn status_error(service: &str, status: StatusCode) -> AppError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::ValidationError("잘못된 요청입니다".to_string())
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::AuthenticationError(format!("{} 인증 거부 ({})", service, status))
        }
        StatusCode::NOT_FOUND => AppError::NotFound("리소스를 찾을 수 없습니다".to_string()),
        StatusCode::CONFLICT => AppError::ConflictError("이미 존재하는 리소스입니다".to_string()),
        StatusCode::TOO_MANY_REQUESTS => AppError::TooManyRequests("요청이 너무 많습니다".to_string()),
        _ => AppError::ExternalServiceError(format!("{} 응답 {}", service, status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;

    #[test]
    fn test_status_error_mapping() {
        let cases = [
            (StatusCode::BAD_REQUEST, ErrorKind::InvalidInput),
            (StatusCode::UNAUTHORIZED, ErrorKind::Unauthorized),
            (StatusCode::FORBIDDEN, ErrorKind::Unauthorized),
            (StatusCode::NOT_FOUND, ErrorKind::NotFound),
            (StatusCode::CONFLICT, ErrorKind::Conflict),
            (StatusCode::TOO_MANY_REQUESTS, ErrorKind::TooManyRequests),
            (StatusCode::BAD_GATEWAY, ErrorKind::InternalFailure),
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::InternalFailure),
        ];

        for (status, kind) in cases {
            assert_eq!(status_error("identity", status).kind(), kind, "{}", status);
        }
    }

    #[test]
    fn test_status_error_uses_fixed_public_messages() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::CONFLICT,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let error = status_error("identity", status);
            assert!(!error.public_message().contains("identity"), "{}", status);
        }

        assert_eq!(status_error("identity", StatusCode::CONFLICT).public_message(), "이미 존재하는 리소스입니다");
    }

    #[test]
    fn test_url_joining() {
        let api = RemoteApi::new("identity", "http://identity:8081/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/v1/accounts"), "http://identity:8081/v1/accounts");
    }
}
