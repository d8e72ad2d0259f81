pub mod auth;
pub mod cors;

pub use auth::{set_session_identity, AdminContext, AuthContext};
pub use cors::create_cors;
