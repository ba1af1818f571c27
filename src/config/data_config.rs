//! 데이터 저장소, 서버, 원격 서비스, 이메일 인증 관련 설정 모듈

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 환경 변수를 파싱하고, 없거나 형식이 잘못되면 기본값을 사용합니다.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} 값 파싱 실패: '{}'. 기본값 사용", key, raw);
            default
        }),
        Err(_) => default,
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 포트. 기본값: 8080
    pub fn port() -> u16 {
        env_or("PORT", 8080)
    }

    /// 서버 호스트. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// MongoDB / Redis 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "accounts".to_string())
    }

    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

/// 이메일 인증 발송 제한 설정
///
/// 기본값은 24시간 동안 사용자당 최대 5회 발송입니다.
pub struct EmailVerificationConfig;

impl EmailVerificationConfig {
    pub fn max_sent_emails() -> u64 {
        env_or("MAX_SENT_EMAILS", 5)
    }

    pub fn window() -> Duration {
        Duration::from_secs(env_or("MAX_SENT_EMAILS_WINDOW_SECONDS", 86_400))
    }

    /// 인증 메일 본문에 들어갈 링크의 기본 URL (`?token=...`이 덧붙습니다)
    pub fn verification_link() -> String {
        env::var("EMAIL_VERIFICATION_LINK")
            .unwrap_or_else(|_| "http://localhost:8080/api/v1/signup/verify-email".to_string())
    }
}

/// 사용자 관리 설정
pub struct UserManagementConfig;

impl UserManagementConfig {
    /// 보관(archive) 후 실제 삭제까지의 유예 시간. 기본값 24시간
    pub fn delete_delay() -> Duration {
        Duration::from_secs(env_or("USER_DELETE_DELAY_SECONDS", 86_400))
    }
}

/// 원격 서비스 엔드포인트 설정
pub struct RemoteServiceConfig;

impl RemoteServiceConfig {
    pub fn identity_url() -> String {
        env::var("IDENTITY_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8081".to_string())
    }

    pub fn profile_url() -> String {
        env::var("PROFILE_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8082".to_string())
    }

    pub fn token_url() -> String {
        env::var("TOKEN_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8083".to_string())
    }

    /// OAuth 자동 가입에 사용하는 원격 회원가입 API
    pub fn signup_api_endpoint() -> String {
        env::var("SIGNUP_API_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:8080/api/v1/signup/oauth".to_string())
    }

    pub fn timeout() -> Duration {
        Duration::from_secs(env_or("REMOTE_TIMEOUT_SECONDS", 30))
    }
}

/// Redis Streams 이벤트 스트림 이름
pub struct EventStreamConfig;

impl EventStreamConfig {
    pub fn user_stream() -> String {
        env::var("USER_EVENT_STREAM").unwrap_or_else(|_| "user-events".to_string())
    }

    pub fn mail_stream() -> String {
        env::var("MAIL_EVENT_STREAM").unwrap_or_else(|_| "mail-events".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_missing_and_invalid_values() {
        assert_eq!(env_or::<u64>("ACCOUNT_TEST_SURELY_UNSET_KEY", 42), 42);

        unsafe { env::set_var("ACCOUNT_TEST_INVALID_NUMBER", "not-a-number") };
        assert_eq!(env_or::<u64>("ACCOUNT_TEST_INVALID_NUMBER", 7), 7);

        unsafe { env::set_var("ACCOUNT_TEST_VALID_NUMBER", " 15 ") };
        assert_eq!(env_or::<u64>("ACCOUNT_TEST_VALID_NUMBER", 7), 15);
    }
}
