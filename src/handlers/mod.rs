//! # HTTP Request Handlers
//!
//! ```text
//! Client ──► Gateway (토큰 검증, X-User-ID 설정) ──► Handlers ──► Services ──► Repositories
//! ```
//!
//! 핸들러는 요청 DTO를 `validator`로 검증하고, [`ServiceLocator`](crate::core::registry::ServiceLocator)에서
//! 서비스를 꺼내 호출한 뒤 결과를 JSON으로 직렬화합니다. 에러는 `AppError`의
//! `ResponseError` 구현이 `{"error", "message"}` 형식으로 변환합니다.
//!
//! | 모듈 | 경로 |
//! |------|------|
//! | [`signup`] | `/api/v1/signup` |
//! | [`auth`] | `/api/v1/auth` |
//! | [`users`] | `/api/v1/users/me` |
//! | [`admin`] | `/api/v1/admin/users` |

pub mod admin;
pub mod auth;
pub mod signup;
pub mod users;
