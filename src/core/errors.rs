//! # Application Error Handling System
//!
//! 계정 오케스트레이션 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! 모든 서비스/리포지토리/원격 어댑터는 [`AppError`]를 반환하며,
//! 핸들러 경계에서 `actix_web::ResponseError` 구현을 통해 HTTP 응답으로 변환됩니다.
//!
//! ## 에러 분류 (ErrorKind)
//!
//! 호출자에게 노출되는 안정적인 분류는 [`ErrorKind`] 입니다.
//! 인프라 계층의 세부 변형(`DatabaseError`, `RedisError`, `ExternalServiceError`)은
//! 모두 `InternalFailure`로 분류되며, 내부 메시지는 외부로 노출되지 않습니다.
//!
//! | AppError | ErrorKind | HTTP Status |
//! |----------|-----------|-------------|
//! | `ValidationError` | `InvalidInput` | 400 Bad Request |
//! | `AuthenticationError` | `Unauthorized` | 401 Unauthorized |
//! | `NotFound` | `NotFound` | 404 Not Found |
//! | `ConflictError` | `Conflict` | 409 Conflict |
//! | `InvalidToken` | `InvalidToken` | 400 Bad Request |
//! | `TooManyRequests` | `TooManyRequests` | 429 Too Many Requests |
//! | `DatabaseError` / `RedisError` / `ExternalServiceError` / `InternalError` | `InternalFailure` | 500 |
//! | `SagaCompensationFailed` | 원인 에러의 분류 | 원인 에러의 상태 코드 |
//!
//! ## 보상 실패 (Composite Error)
//!
//! 회원가입 사가의 보상 작업이 실패하더라도 원래의 실패 원인이 가려지면 안 됩니다.
//! `SagaCompensationFailed`는 원인 에러와 보상 중 발생한 모든 에러를 함께 보관합니다.
//!
//! ```rust,ignore
//! match signup_service.local_signup(request).await {
//!     Err(AppError::SagaCompensationFailed { cause, compensation }) => {
//!         log::error!("원인: {}, 보상 실패: {}건", cause, compensation.len());
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use thiserror::Error;

/// 호출자에게 노출되는 안정적인 에러 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Unauthorized,
    NotFound,
    Conflict,
    InvalidToken,
    TooManyRequests,
    InternalFailure,
}

impl ErrorKind {
    /// 응답 본문의 `error` 필드에 사용되는 코드 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidToken => "invalid_token",
            ErrorKind::TooManyRequests => "too_many_requests",
            ErrorKind::InternalFailure => "internal_failure",
        }
    }
}

/// 애플리케이션 전역 에러 타입
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// // MongoDB 에러 변환
/// collection.find_one(filter).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
///
/// // Redis 에러 변환
/// redis.set_with_expiry(&key, &value, ttl).await
///     .map_err(|e| AppError::RedisError(e.to_string()))?;
///
/// // 원격 서비스 에러 변환
/// client.post(url).send().await
///     .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 실패, 지원하지 않는 프로바이더 등
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 잘못된 자격 증명, 미인증 계정, OAuth 토큰 교환 실패
    ///
    /// 내부 메시지에는 실패 사유가 담기지만, 공개 메시지는 항상 동일합니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 형식이 잘못되었거나 만료/소비된 코드 또는 토큰
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    /// 사가 보상 작업 자체가 실패한 경우
    ///
    /// `cause`는 보상을 촉발한 원래 에러, `compensation`은 보상 단계별 실패 목록입니다.
    #[error("{cause} (보상 작업 실패: {})", join_errors(.compensation))]
    SagaCompensationFailed {
        cause: Box<AppError>,
        compensation: Vec<AppError>,
    },
}

fn join_errors(errors: &[AppError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// 안정적인 에러 분류를 반환합니다.
    ///
    /// 보상 실패 복합 에러는 원래 원인의 분류를 따릅니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ValidationError(_) => ErrorKind::InvalidInput,
            AppError::AuthenticationError(_) => ErrorKind::Unauthorized,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::ConflictError(_) => ErrorKind::Conflict,
            AppError::InvalidToken(_) => ErrorKind::InvalidToken,
            AppError::TooManyRequests(_) => ErrorKind::TooManyRequests,
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => ErrorKind::InternalFailure,
            AppError::SagaCompensationFailed { cause, .. } => cause.kind(),
        }
    }

    /// 외부에 노출해도 안전한 메시지를 반환합니다.
    ///
    /// 인증 실패 사유(존재하지 않는 이메일, 미인증, 비밀번호 불일치)와
    /// 인프라 오류의 세부 내용은 숨깁니다.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::TooManyRequests(msg) => msg.clone(),
            AppError::AuthenticationError(_) => "인증에 실패했습니다".to_string(),
            AppError::InvalidToken(_) => "유효하지 않거나 만료된 토큰입니다".to_string(),
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "내부 서버 오류가 발생했습니다".to_string(),
            AppError::SagaCompensationFailed { cause, .. } => cause.public_message(),
        }
    }

    /// 원인 에러와 보상 실패 목록으로 최종 에러를 구성합니다.
    ///
    /// 보상 실패가 없으면 원인 에러를 그대로 반환합니다.
    pub fn with_compensation(cause: AppError, compensation: Vec<AppError>) -> AppError {
        if compensation.is_empty() {
            cause
        } else {
            AppError::SagaCompensationFailed {
                cause: Box::new(cause),
                compensation,
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::InvalidToken => StatusCode::BAD_REQUEST,
            ErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        if self.kind() == ErrorKind::InternalFailure {
            log::error!("요청 처리 중 내부 오류: {}", self);
        }

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.kind().as_str(),
                "message": self.public_message()
            }))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 크레이트 에러에 문맥을 덧붙여 `InternalError`로 변환하는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
