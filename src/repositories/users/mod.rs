//! 사용자 디렉터리 저장소

pub mod user_repo;

pub use user_repo::{MongoUserRepository, UserDirectory};
