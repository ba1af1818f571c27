pub mod sent_email_repo;

pub use sent_email_repo::{MongoSentEmailRepository, SentEmailStore};
