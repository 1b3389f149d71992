//! Courio Auth: session tokens, sliding session validation, password
//! hashing and the signup/login facade.

pub mod config;
pub mod cookie;
pub mod error;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

pub use config::{AuthConfig, SESSION_COOKIE_NAME};
pub use cookie::SessionCookie;
pub use error::AuthError;
pub use service::{AuthService, IssuedToken, LoginInput, SignupInput};
pub use session::SessionManager;
