pub mod dashboard;
pub mod employees;
pub mod history;
pub mod holidays;
pub mod home;
pub mod login;
pub mod new_request;

pub use dashboard::*;
pub use employees::*;
pub use history::*;
pub use holidays::*;
pub use home::*;
pub use login::*;
pub use new_request::*;
