pub mod authenticated_user;
pub mod authentication_request;
pub mod claims;
pub mod auth_session;

pub use authenticated_user::*;
pub use authentication_request::*;
pub use claims::*;
pub use auth_session::*;
