pub mod auth;
pub mod leave;
