//! HTTP 경계의 요청/응답 DTO. 요청 DTO는 `validator`로 검증합니다.

pub mod auth;
pub mod signup;
pub mod users;

pub use auth::*;
pub use signup::*;
pub use users::*;
