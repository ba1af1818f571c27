//! 관리자용 사용자 관리 핸들러
//!
//! 관리자 권한 확인은 게이트웨이가 `/api/v1/admin` 경로 단위로 수행합니다.

use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;
use crate::{
    core::{errors::AppError, registry::ServiceLocator},
    domain::dto::UserResponse,
    services::users::UserManagementService,
};

#[get("/{user_id}")]
pub async fn get_user(user_id: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    let user = service.get_user(*user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("/{user_id}")]
pub async fn delete_user(user_id: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    service.delete_user(*user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[post("/{user_id}/archive")]
pub async fn archive_user(user_id: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    Ok(HttpResponse::Ok().json(UserResponse::from(service.archive_user(*user_id).await?)))
}

#[post("/{user_id}/restore")]
pub async fn restore_user(user_id: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    Ok(HttpResponse::Ok().json(UserResponse::from(service.restore_user(*user_id).await?)))
}

#[post("/{user_id}/block")]
pub async fn block_user(user_id: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    Ok(HttpResponse::Ok().json(UserResponse::from(service.block_user(*user_id).await?)))
}

#[post("/{user_id}/unblock")]
pub async fn unblock_user(user_id: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let service = ServiceLocator::get::<UserManagementService>()?;
    Ok(HttpResponse::Ok().json(UserResponse::from(service.unblock_user(*user_id).await?)))
}
