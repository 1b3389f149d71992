//! SurrealDB repository implementations.

mod session;
mod user;

pub use session::SurrealSessionRepository;
pub use user::SurrealUserRepository;
