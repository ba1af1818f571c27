//! 본인 계정 관리 핸들러 (`X-User-ID` 헤더 사용자)

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::{
    core::{errors::AppError, registry::ServiceLocator},
    domain::dto::{ChangeEmailRequest, UserResponse},
    middlewares::GatewayUser,
    services::users::UserManagementService,
};

#[get("")]
pub async fn get_me(user: GatewayUser) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    let found = service.get_user(user.id()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}

#[post("/archive")]
pub async fn archive_me(user: GatewayUser) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    let archived = service.archive_user(user.id()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(archived)))
}

#[post("/restore")]
pub async fn restore_me(user: GatewayUser) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    let restored = service.restore_user(user.id()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(restored)))
}

#[post("/email")]
pub async fn change_email(
    user: GatewayUser,
    payload: web::Json<ChangeEmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = ServiceLocator::get::<UserManagementService>()?;
    let verification_email_sent = service.change_email(user.id(), &payload.email).await?;

    Ok(HttpResponse::Ok().json(json!({
        "user_id": user.id(),
        "email": payload.email,
        "verification_email_sent": verification_email_sent
    })))
}
