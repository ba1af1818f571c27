//! 사용자 생명주기 서비스 모듈
//!
//! - [`SignupService`]: 디렉터리 → 인증 계정 → 프로필 순서의 회원가입 사가
//! - [`EmailVerificationService`]: 발송 제한이 있는 인증 메일 발송과 토큰 검증
//! - [`UserManagementService`]: 보관/복구/차단/삭제와 이메일 변경

pub mod email_verification_service;
pub mod management_service;
pub mod signup_service;

pub use email_verification_service::{EmailVerificationPolicy, EmailVerificationService};
pub use management_service::UserManagementService;
pub use signup_service::SignupService;
