//! # Domain Models
//!
//! 원격 협력 서비스(Identity, Profile, Token, OAuth 프로바이더, 이벤트 버스)와
//! 주고받는 값 객체입니다. 이 서비스는 이 모델들을 저장하지 않습니다.

pub mod account;
pub mod event;
pub mod oauth;
pub mod profile;
pub mod token;

pub use account::*;
pub use event::*;
pub use oauth::*;
pub use profile::*;
pub use token::*;
