pub mod event_emitter;

pub use event_emitter::{MailEventPublisher, RedisStreamPublisher, UserEventPublisher};
