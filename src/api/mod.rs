mod auth;
pub mod client;
mod holidays;
mod leave;
pub mod types;
mod users;

pub use client::*;
pub use types::*;
