pub mod sent_email;

pub use sent_email::SentEmailRecord;
