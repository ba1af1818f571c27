//! # 게이트웨이 사용자 추출기
//!
//! 인증 게이트웨이가 토큰 검증 후 설정한 사용자 ID 헤더(기본 `X-User-ID`)를 읽습니다.
//! 이 서비스는 토큰을 직접 검증하지 않으며 헤더 값을 신뢰합니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! async fn me(user: GatewayUser) -> Result<HttpResponse, AppError> {
//!     let user_id: Uuid = user.id();
//!     // ...
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use uuid::Uuid;
use crate::{
    config::GatewayConfig,
    core::errors::AppError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayUser(pub Uuid);

impl GatewayUser {
    pub fn id(&self) -> Uuid {
        self.0
    }

    fn from_request_headers(req: &HttpRequest) -> Result<Self, AppError> {
        let header = GatewayConfig::user_id_header();

        let value = req
            .headers()
            .get(header.as_str())
            .ok_or_else(|| AppError::AuthenticationError(format!("{} 헤더가 없습니다", header)))?
            .to_str()
            .map_err(|_| AppError::AuthenticationError(format!("{} 헤더가 올바르지 않습니다", header)))?;

        Uuid::parse_str(value.trim())
            .map(GatewayUser)
            .map_err(|_| AppError::AuthenticationError(format!("{} 헤더가 UUID가 아닙니다", header)))
    }
}

impl FromRequest for GatewayUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_headers(req))
    }
}
