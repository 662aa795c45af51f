//! Credential resolution and secret storage.

pub mod resolver;
pub mod secret_store;
