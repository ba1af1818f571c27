//! # Core Module
//!
//! 서비스 전역에서 공유되는 기반 기능입니다.
//!
//! - [`errors`]: `AppError`, `ErrorKind`, HTTP 응답 매핑
//! - [`registry`]: 부트스트랩 시 조립된 서비스를 보관하는 `ServiceLocator`

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
