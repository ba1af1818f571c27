//! # 라우트 구성
//!
//! ```text
//! /health
//! /api/v1/signup             회원가입, OAuth 가입, 이메일 인증
//! /api/v1/auth               로컬 / OAuth 로그인 (1단계, 2단계 코드)
//! /api/v1/users/me           본인 계정 관리 (X-User-ID)
//! /api/v1/admin/users        관리자 사용자 관리
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;
use crate::{
    caching::RedisClient,
    core::registry::ServiceLocator,
    db::Database,
    handlers,
};

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_signup_routes(cfg);
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_admin_routes(cfg);
}

fn configure_signup_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/signup")
            .service(handlers::signup::local_signup)
            .service(handlers::signup::oauth_signup)
            .service(handlers::signup::verify_email)
            .service(handlers::signup::resend_verification_email)
    );
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // 로컬 로그인
            .service(handlers::auth::local_login)
            .service(handlers::auth::local_issue_code)
            .service(handlers::auth::local_verify_code)
            // OAuth 로그인
            .service(handlers::auth::oauth_login_url)
            .service(handlers::auth::oauth_login)
            .service(handlers::auth::oauth_issue_code)
            .service(handlers::auth::oauth_verify_code)
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users/me")
            .service(handlers::users::get_me)
            .service(handlers::users::archive_me)
            .service(handlers::users::restore_me)
            .service(handlers::users::change_email)
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/users")
            .service(handlers::admin::get_user)
            .service(handlers::admin::delete_user)
            .service(handlers::admin::archive_user)
            .service(handlers::admin::restore_user)
            .service(handlers::admin::block_user)
            .service(handlers::admin::unblock_user)
    );
}

async fn database_status() -> &'static str {
    match ServiceLocator::get::<Database>() {
        Ok(db) if db.ping().await.is_ok() => "up",
        Ok(_) => "down",
        Err(_) => "unregistered",
    }
}

async fn redis_status() -> &'static str {
    match ServiceLocator::get::<RedisClient>() {
        Ok(redis) if redis.ping().await.is_ok() => "up",
        Ok(_) => "down",
        Err(_) => "unregistered",
    }
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    let database = database_status().await;
    let cache = redis_status().await;
    let healthy = database == "up" && cache == "up";

    let body = json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "account_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "database": database,
            "cache": cache
        }
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_reports_unregistered_dependencies() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "degraded");
    }

    #[actix_web::test]
    async fn test_me_routes_require_gateway_header() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_unknown_provider_is_bad_request() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/auth/oauth/github/login-url").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_input");
    }
}
