//! # Domain Layer
//!
//! ```text
//! domain/
//! ├── entities/  - 이 서비스가 저장하는 엔티티 (DirectoryUser, SentEmailRecord)
//! ├── models/    - 원격 협력 서비스와 주고받는 값 객체
//! └── dto/       - HTTP 요청/응답 DTO
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
