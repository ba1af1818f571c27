//! 사용자 디렉터리 엔티티

pub mod user;

pub use user::{DirectoryUser, UserStatus};
