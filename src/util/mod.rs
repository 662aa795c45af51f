//! Utility modules for the process environment and terminal.

pub mod caller;
pub mod git;
pub mod logging;
pub mod prompt;
