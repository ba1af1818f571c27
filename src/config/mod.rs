//! # Configuration Module
//!
//! 환경 변수 기반 설정을 정적 접근자로 제공합니다.
//! `main`에서 `.env.{PROFILE}` 파일을 먼저 로드한 뒤 사용합니다.
//!
//! - [`data_config`]: 서버, MongoDB/Redis, 원격 서비스, 이메일 발송 제한, 이벤트 스트림
//! - [`auth_config`]: 인증 프로바이더, OAuth 클라이언트, 로그인 코드 TTL, 게이트웨이 헤더
//!
//! ```rust,ignore
//! use crate::config::{LoginCodeConfig, EmailVerificationConfig};
//!
//! let ttl = LoginCodeConfig::login_ttl();
//! let max = EmailVerificationConfig::max_sent_emails();
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
