//! # Repositories
//!
//! 저장소와 원격 협력 서비스에 대한 접근 계층입니다.
//! 각 모듈은 `async_trait` 트레이트와 운영 구현체를 함께 제공하며,
//! 서비스 계층은 트레이트 객체(`Arc<dyn Trait>`)에만 의존합니다.
//!
//! | 모듈 | 트레이트 | 구현체 | 백엔드 |
//! |------|----------|--------|--------|
//! | [`codes`] | `CodeStore` | `RedisCodeStore` | Redis + Lua |
//! | [`users`] | `UserDirectory` | `MongoUserRepository` | MongoDB |
//! | [`emails`] | `SentEmailStore` | `MongoSentEmailRepository` | MongoDB |
//! | [`identity`] | `IdentityClient` | `HttpIdentityClient` | HTTP |
//! | [`profile`] | `ProfileClient` | `HttpProfileClient` | HTTP |
//! | [`tokens`] | `TokenIssuer` | `HttpTokenIssuer` | HTTP |
//! | [`signup`] | `SignupApi` | `HttpSignupApi` | HTTP |
//! | [`events`] | `UserEventPublisher`, `MailEventPublisher` | `RedisStreamPublisher` | Redis Streams |

pub mod codes;
pub mod emails;
pub mod events;
pub mod identity;
pub mod profile;
pub mod remote;
pub mod signup;
pub mod tokens;
pub mod users;
