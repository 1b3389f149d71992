//! Domain models for the Courio session core.

pub mod session;
pub mod user;
