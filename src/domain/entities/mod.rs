//! # Domain Entities
//!
//! 이 서비스가 직접 저장하는 엔티티입니다.
//!
//! - [`users`]: 디렉터리 사용자 (MongoDB `users` 컬렉션)
//! - [`emails`]: 인증 메일 발송 기록 (MongoDB `sent_emails` 컬렉션)
//!
//! 인증 계정과 프로필은 원격 서비스가 소유하므로 [`crate::domain::models`]에 정의됩니다.

pub mod users;
pub mod emails;

pub use users::*;
pub use emails::*;
