//! 회원가입과 이메일 인증 핸들러

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use actix_web::http::header;
use serde_json::json;
use validator::Validate;
use crate::{
    config::AuthProvider,
    core::{errors::AppError, registry::ServiceLocator},
    domain::{
        dto::{LocalSignupRequest, LocalSignupResponse, OAuthSignupQuery, VerifyEmailQuery},
        models::OAuthCredential,
    },
    middlewares::GatewayUser,
    services::users::{EmailVerificationService, SignupService},
};

/// `Authorization: Bearer <token>` 헤더 값
fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

#[post("")]
pub async fn local_signup(
    payload: web::Json<LocalSignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let signup = ServiceLocator::get::<SignupService>()?;
    let user = signup.local_signup(&payload.email, &payload.password).await?;

    // 인증 메일 실패는 가입을 되돌리지 않음
    let verification = ServiceLocator::get::<EmailVerificationService>()?;
    let verification_email_sent = match verification.send_verification_email(user.user_id, &user.email).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("가입 후 인증 메일 발송 실패: {} ({})", user.user_id, e);
            false
        }
    };

    Ok(HttpResponse::Created().json(LocalSignupResponse { user, verification_email_sent }))
}

#[get("/oauth/{provider}")]
pub async fn oauth_signup(
    req: HttpRequest,
    provider: web::Path<String>,
    query: web::Query<OAuthSignupQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let provider: AuthProvider = provider.parse()?;
    let credential = OAuthCredential::from_parts(bearer_token(&req), query.into_inner().code)?;

    let signup = ServiceLocator::get::<SignupService>()?;
    let result = signup.oauth_signup(provider, &credential).await?;

    Ok(HttpResponse::Created().json(result))
}

#[get("/verify-email")]
pub async fn verify_email(
    query: web::Query<VerifyEmailQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let verification = ServiceLocator::get::<EmailVerificationService>()?;
    let user_id = verification.verify_email_token(&query.token).await?;

    Ok(HttpResponse::Ok().json(json!({
        "user_id": user_id,
        "verified": true
    })))
}

/// 계정에 등록된 이메일로만 재발송합니다.
#[post("/verify-email/resend")]
pub async fn resend_verification_email(user: GatewayUser) -> Result<HttpResponse, AppError> {
    let verification = ServiceLocator::get::<EmailVerificationService>()?;
    verification.resend_verification_email(user.id()).await?;

    Ok(HttpResponse::Accepted().json(json!({
        "message": "인증 메일을 발송했습니다"
    })))
}
