//! # Account Service 진입점
//!
//! 1. `.env.{PROFILE}` 로드와 로깅 초기화
//! 2. MongoDB / Redis 연결 (ping) 및 인덱스 생성
//! 3. 저장소 → 원격 어댑터 → 서비스 순서로 객체 그래프 조립 후 `ServiceLocator` 등록
//! 4. Governor, CORS, Logger, NormalizePath 미들웨어와 함께 HTTP 서버 시작

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use account_service_backend::{
    caching::RedisClient,
    config::{DatabaseConfig, EventStreamConfig, LoginCodeConfig, RemoteServiceConfig, ServerConfig, UserManagementConfig},
    core::{errors::{AppError, AppResult}, registry::ServiceLocator},
    db::Database,
    repositories::{
        codes::RedisCodeStore,
        emails::MongoSentEmailRepository,
        events::RedisStreamPublisher,
        identity::HttpIdentityClient,
        profile::HttpProfileClient,
        remote::RemoteApi,
        signup::HttpSignupApi,
        tokens::HttpTokenIssuer,
        users::MongoUserRepository,
    },
    routes::configure_all_routes,
    services::{
        auth::{LocalLoginService, LoginCodeManager, OAuthLoginService, OAuthProviders},
        users::{EmailVerificationPolicy, EmailVerificationService, SignupService, UserManagementService},
    },
};

#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 계정 서비스 시작중...");

    if let Err(e) = bootstrap().await {
        error!("서비스 초기화 실패: {}", e);
        return Err(std::io::Error::other(e.to_string()));
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다! ({}개 등록)", ServiceLocator::len());

    start_http_server().await
}

/// 객체 그래프를 조립해 `ServiceLocator`에 등록합니다.
async fn bootstrap() -> AppResult<()> {
    let (database, redis) = initialize_data_stores().await?;

    // 저장소
    let directory = Arc::new(MongoUserRepository::new(database.clone()));
    directory.create_indexes().await?;
    let sent_emails = Arc::new(MongoSentEmailRepository::new(database.clone()));
    sent_emails.create_indexes().await?;
    let code_store = Arc::new(RedisCodeStore::new(redis.clone()));
    let publisher = Arc::new(RedisStreamPublisher::new(
        redis.clone(),
        EventStreamConfig::user_stream(),
        EventStreamConfig::mail_stream(),
    ));

    // 원격 서비스
    let timeout = RemoteServiceConfig::timeout();
    let identity = Arc::new(HttpIdentityClient::new(
        RemoteApi::new("identity", &RemoteServiceConfig::identity_url(), timeout)?,
    ));
    let profile = Arc::new(HttpProfileClient::new(
        RemoteApi::new("profile", &RemoteServiceConfig::profile_url(), timeout)?,
    ));
    let tokens = Arc::new(HttpTokenIssuer::new(
        RemoteApi::new("token", &RemoteServiceConfig::token_url(), timeout)?,
    ));
    let signup_api = Arc::new(HttpSignupApi::new(
        RemoteApi::new("signup", &RemoteServiceConfig::signup_api_endpoint(), timeout)?,
    ));
    let providers = OAuthProviders::from_env();

    // 코드 관리자 (로그인 / 이메일 인증은 TTL과 키 접두사가 다름)
    let login_codes = Arc::new(LoginCodeManager::new(
        code_store.clone(),
        LoginCodeConfig::login_ttl(),
        LoginCodeConfig::login_prefix(),
    ));
    let email_codes = Arc::new(LoginCodeManager::new(
        code_store,
        LoginCodeConfig::email_ttl(),
        LoginCodeConfig::email_prefix(),
    ));

    // 서비스
    let verification = Arc::new(EmailVerificationService::new(
        sent_emails,
        email_codes,
        tokens.clone(),
        identity.clone(),
        publisher.clone(),
        EmailVerificationPolicy::from_env(),
    ));
    let signup = Arc::new(SignupService::new(
        directory.clone(),
        identity.clone(),
        profile.clone(),
        publisher.clone(),
    ));
    let local_login = Arc::new(LocalLoginService::new(
        identity.clone(),
        tokens.clone(),
        login_codes.clone(),
    ));
    let oauth_login = Arc::new(OAuthLoginService::new(
        identity.clone(),
        signup_api,
        tokens,
        login_codes,
        providers,
    ));
    let management = Arc::new(UserManagementService::new(
        directory,
        identity,
        profile,
        publisher,
        verification.clone(),
        UserManagementConfig::delete_delay(),
    ));

    ServiceLocator::set(database);
    ServiceLocator::set(redis);
    ServiceLocator::set(verification);
    ServiceLocator::set(signup);
    ServiceLocator::set(local_login);
    ServiceLocator::set(oauth_login);
    ServiceLocator::set(management);

    Ok(())
}

async fn start_http_server() -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

async fn initialize_data_stores() -> AppResult<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await?);

    let redis = Arc::new(
        RedisClient::new(&DatabaseConfig::redis_url())
            .await
            .map_err(|e| AppError::RedisError(format!("Redis 연결 실패: {}", e)))?
    );

    Ok((database, redis))
}

fn configure_cors() -> Cors {
    let origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig { per_second, burst_size };
    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
