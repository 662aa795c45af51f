//! Data structures shared across the helper.

pub mod credential;
