//! 로컬 / OAuth 로그인 핸들러
//!
//! 두 로그인 방식 모두 1단계(`/login`, 토큰 즉시 발급)와
//! 2단계(`/code` → `/code/verify`) 경로를 제공합니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    config::AuthProvider,
    core::{errors::AppError, registry::ServiceLocator},
    domain::{
        dto::{LocalLoginRequest, LoginCodeResponse, OAuthLoginRequest, TokenResponse, VerifyLoginCodeRequest},
        models::OAuthCredential,
    },
    services::auth::{LocalLoginService, OAuthLoginService},
};

#[post("/local/login")]
pub async fn local_login(
    payload: web::Json<LocalLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ServiceLocator::get::<LocalLoginService>()?;
    let tokens = service.login(&payload.email, &payload.password).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(tokens)))
}

#[post("/local/code")]
pub async fn local_issue_code(
    payload: web::Json<LocalLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ServiceLocator::get::<LocalLoginService>()?;
    let (code, user_id) = service.issue_login_code(&payload.email, &payload.password).await?;

    Ok(HttpResponse::Ok().json(LoginCodeResponse { user_id, code }))
}

#[post("/local/code/verify")]
pub async fn local_verify_code(
    payload: web::Json<VerifyLoginCodeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ServiceLocator::get::<LocalLoginService>()?;
    let tokens = service.verify_login_code(payload.user_id, &payload.code).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(tokens)))
}

#[get("/oauth/{provider}/login-url")]
pub async fn oauth_login_url(
    provider: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider: AuthProvider = provider.parse()?;

    let service = ServiceLocator::get::<OAuthLoginService>()?;
    Ok(HttpResponse::Ok().json(service.get_login_url(provider)?))
}

fn oauth_input(provider: &str, payload: OAuthLoginRequest) -> Result<(AuthProvider, OAuthCredential), AppError> {
    let provider: AuthProvider = provider.parse()?;
    let credential = OAuthCredential::from_parts(payload.access_token, payload.code)?;
    Ok((provider, credential))
}

#[post("/oauth/{provider}/login")]
pub async fn oauth_login(
    provider: web::Path<String>,
    payload: web::Json<OAuthLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let (provider, credential) = oauth_input(&provider, payload.into_inner())?;

    let service = ServiceLocator::get::<OAuthLoginService>()?;
    let tokens = service.login(provider, &credential).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(tokens)))
}

#[post("/oauth/{provider}/code")]
pub async fn oauth_issue_code(
    provider: web::Path<String>,
    payload: web::Json<OAuthLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let (provider, credential) = oauth_input(&provider, payload.into_inner())?;

    let service = ServiceLocator::get::<OAuthLoginService>()?;
    let (code, user_id) = service.issue_login_code(provider, &credential).await?;

    Ok(HttpResponse::Ok().json(LoginCodeResponse { user_id, code }))
}

#[post("/oauth/{provider}/code/verify")]
pub async fn oauth_verify_code(
    provider: web::Path<String>,
    payload: web::Json<VerifyLoginCodeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    provider.parse::<AuthProvider>()?;

    let service = ServiceLocator::get::<OAuthLoginService>()?;
    let tokens = service.verify_login_code(payload.user_id, &payload.code).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(tokens)))
}
