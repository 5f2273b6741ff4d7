pub mod common;
pub mod error;
pub mod guard;
pub mod layout;
