//! Git askpass helper backed by the OS keychain.
//!
//! Git runs the helper with a prompt such as `Username for 'https://host': `.
//! After confirming the parent process is git's HTTPS transport helper, it
//! looks up the credential stored for the repository's `remote.origin.url`,
//! prompting once and storing the answer when none exists.
//!
//! ## Modules
//! - `cli` — Argument validation and dispatch
//! - `core` — Credential resolution and secret store access
//! - `models` — Data structures
//! - `util` — Caller verification, git config, prompting, logging

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
