//! Caller verification: only git's HTTPS transport helper may invoke us.

use crate::constants;
use anyhow::{bail, Result};
use std::ffi::OsStr;
use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};
use tracing::debug;

/// Decides whether the process that launched us is allowed to read credentials.
pub trait CallerVerifier {
    fn is_authorized_caller(&self) -> Result<bool>;
}

/// Walks the process table and checks the parent's command name.
#[derive(Debug, Clone)]
pub struct ProcessTableVerifier {
    expected_name: String,
}

impl ProcessTableVerifier {
    pub fn new() -> Self {
        Self::with_expected_name(constants::TRANSPORT_HELPER_NAME)
    }

    pub fn with_expected_name(name: impl Into<String>) -> Self {
        Self {
            expected_name: name.into(),
        }
    }

    /// Exact comparison, plus the kernel-truncated form on Linux.
    pub fn name_matches(&self, command_name: &OsStr) -> bool {
        let Some(command_name) = command_name.to_str() else {
            return false;
        };
        if command_name == self.expected_name {
            return true;
        }
        cfg!(target_os = "linux")
            && self.expected_name.len() > constants::LINUX_COMM_MAX_LEN
            && self
                .expected_name
                .get(..constants::LINUX_COMM_MAX_LEN)
                .is_some_and(|truncated| command_name == truncated)
    }
}

impl Default for ProcessTableVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CallerVerifier for ProcessTableVerifier {
    fn is_authorized_caller(&self) -> Result<bool> {
        let parent_pid = parent_pid();
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
        );
        if system.processes().is_empty() {
            bail!("unable to read the process table");
        }

        let parent = system.process(Pid::from_u32(parent_pid));

        match parent {
            Some(process) => {
                let matched = self.name_matches(process.name());
                debug!(
                    parent_pid,
                    parent = %process.name().to_string_lossy(),
                    matched,
                    "checked caller"
                );
                Ok(matched)
            }
            None => {
                debug!(parent_pid, "parent process not in process table");
                Ok(false)
            }
        }
    }
}

/// Pid of the process that spawned us.
pub fn parent_pid() -> u32 {
    nix::unistd::getppid().as_raw() as u32
}
