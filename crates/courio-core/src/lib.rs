//! Courio Core: domain models, credential store traits and error types
//! shared by the storage and authentication crates.

pub mod error;
pub mod models;
pub mod repository;
