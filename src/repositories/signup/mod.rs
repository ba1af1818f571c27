pub mod signup_api;

pub use signup_api::{HttpSignupApi, SignupApi};
