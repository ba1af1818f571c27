//! # Authentication Configuration Module
//!
//! 인증 프로바이더, 로그인 코드, OAuth 클라이언트 설정을 관리합니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 이메일/패스워드 (비밀번호 검증은 원격 Identity 서비스가 수행)
//! 2. **Google / Naver / Kakao OAuth 2.0**: 소셜 로그인
//!
//! ## 환경 변수
//!
//! ### OAuth 클라이언트
//! ```bash
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URI="https://yourdomain.com/auth/google/callback"
//!
//! export NAVER_CLIENT_ID="..."      # NAVER_CLIENT_SECRET, NAVER_REDIRECT_URI
//! export KAKAO_CLIENT_ID="..."      # KAKAO_CLIENT_SECRET, KAKAO_REDIRECT_URI
//! ```
//!
//! 세 값이 모두 설정된 프로바이더만 활성화됩니다.
//!
//! ### 로그인 코드
//! ```bash
//! export LOGIN_CODE_TTL_SECONDS="300"     # 로그인 코드 유효 시간 (기본 5분)
//! export EMAIL_CODE_TTL_SECONDS="3600"    # 이메일 인증 코드 유효 시간 (기본 1시간)
//! export LOGIN_CODE_PREFIX="login_code:"
//! export EMAIL_CODE_PREFIX="email_code:"
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use crate::config::data_config::env_or;
use crate::core::errors::AppError;

/// 인증 프로바이더 종류
///
/// 원격 Identity 서비스와 주고받는 JSON 에서는 소문자 문자열(`"google"`)로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 로컬 이메일/패스워드 인증
    Local,
    Google,
    Naver,
    Kakao,
}

impl AuthProvider {
    pub const OAUTH: [AuthProvider; 3] = [AuthProvider::Google, AuthProvider::Naver, AuthProvider::Kakao];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
            AuthProvider::Naver => "naver",
            AuthProvider::Kakao => "kakao",
        }
    }

    pub fn is_oauth(&self) -> bool {
        !matches!(self, AuthProvider::Local)
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            AuthProvider::Local => "LOCAL",
            AuthProvider::Google => "GOOGLE",
            AuthProvider::Naver => "NAVER",
            AuthProvider::Kakao => "KAKAO",
        }
    }
}

impl FromStr for AuthProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            "naver" => Ok(AuthProvider::Naver),
            "kakao" => Ok(AuthProvider::Kakao),
            _ => Err(AppError::ValidationError(format!("지원하지 않는 인증 프로바이더입니다: {}", s))),
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 단일 OAuth 프로바이더의 클라이언트 설정
///
/// 엔드포인트 URI는 프로바이더별 기본값을 가지며 `{PROVIDER}_AUTH_URI`,
/// `{PROVIDER}_TOKEN_URI`, `{PROVIDER}_USER_INFO_URI`로 덮어쓸 수 있습니다.
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub user_info_uri: String,
}

impl OAuthClientConfig {
    /// 환경 변수에서 프로바이더 설정을 읽습니다.
    ///
    /// 클라이언트 ID/시크릿/리디렉션 URI 중 하나라도 없으면 `None`을 반환하며,
    /// 해당 프로바이더는 비활성화됩니다.
    pub fn from_env(provider: AuthProvider) -> Option<Self> {
        let (auth_uri, token_uri, user_info_uri) = Self::default_endpoints(provider)?;
        let prefix = provider.env_prefix();
        let var = |suffix: &str| env::var(format!("{}_{}", prefix, suffix)).ok().filter(|v| !v.is_empty());

        Some(Self {
            client_id: var("CLIENT_ID")?,
            client_secret: var("CLIENT_SECRET")?,
            redirect_uri: var("REDIRECT_URI")?,
            auth_uri: var("AUTH_URI").unwrap_or_else(|| auth_uri.to_string()),
            token_uri: var("TOKEN_URI").unwrap_or_else(|| token_uri.to_string()),
            user_info_uri: var("USER_INFO_URI").unwrap_or_else(|| user_info_uri.to_string()),
        })
    }

    fn default_endpoints(provider: AuthProvider) -> Option<(&'static str, &'static str, &'static str)> {
        match provider {
            AuthProvider::Local => None,
            AuthProvider::Google => Some((
                "https://accounts.google.com/o/oauth2/auth",
                "https://oauth2.googleapis.com/token",
                "https://www.googleapis.com/oauth2/v2/userinfo",
            )),
            AuthProvider::Naver => Some((
                "https://nid.naver.com/oauth2.0/authorize",
                "https://nid.naver.com/oauth2.0/token",
                "https://openapi.naver.com/v1/nid/me",
            )),
            AuthProvider::Kakao => Some((
                "https://kauth.kakao.com/oauth/authorize",
                "https://kauth.kakao.com/oauth/token",
                "https://kapi.kakao.com/v2/user/me",
            )),
        }
    }
}

/// 일회용 로그인 코드 설정
pub struct LoginCodeConfig;

impl LoginCodeConfig {
    /// 로그인 코드 TTL. 기본값 5분
    pub fn login_ttl() -> Duration {
        Duration::from_secs(env_or("LOGIN_CODE_TTL_SECONDS", 300))
    }

    /// 이메일 인증 코드 TTL. 기본값 1시간
    pub fn email_ttl() -> Duration {
        Duration::from_secs(env_or("EMAIL_CODE_TTL_SECONDS", 3600))
    }

    pub fn login_prefix() -> String {
        env::var("LOGIN_CODE_PREFIX").unwrap_or_else(|_| "login_code:".to_string())
    }

    pub fn email_prefix() -> String {
        env::var("EMAIL_CODE_PREFIX").unwrap_or_else(|_| "email_code:".to_string())
    }
}

/// 게이트웨이가 인증 후 설정하는 사용자 ID 헤더
pub struct GatewayConfig;

impl GatewayConfig {
    pub fn user_id_header() -> String {
        env::var("USER_ID_HEADER_KEY").unwrap_or_else(|_| "X-User-ID".to_string())
    }
}
