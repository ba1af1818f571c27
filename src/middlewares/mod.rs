//! HTTP 요청 전처리
//!
//! - [`GatewayUser`]: 게이트웨이가 전달한 사용자 ID 헤더 추출기

pub mod gateway_user;

pub use gateway_user::GatewayUser;
