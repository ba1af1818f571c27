pub mod identity_repo;

pub use identity_repo::{HttpIdentityClient, IdentityClient};
