//! Repository identification through `git config`.

use crate::constants;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Produces the key under which a repository's credential is stored.
pub trait RepositoryIdentifier {
    fn origin_url(&self) -> Result<String>;
}

/// Reads `remote.origin.url` by running `git config` in a working directory.
#[derive(Debug, Clone, Default)]
pub struct GitConfig {
    /// Directory to run git in; the process's current directory when `None`.
    pub work_dir: Option<PathBuf>,
}

impl GitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(dir.into()),
        }
    }

    /// Value of a single configuration key.
    pub fn get(&self, key: &str) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.arg("config").arg(key);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        let stdout = run(cmd).with_context(|| format!("run git config {}", key))?;
        Ok(first_line(&stdout))
    }
}

impl RepositoryIdentifier for GitConfig {
    fn origin_url(&self) -> Result<String> {
        let url = self.get(constants::ORIGIN_URL_KEY)?;
        if url.is_empty() {
            bail!("{} is empty", constants::ORIGIN_URL_KEY);
        }
        debug!(repository = %url, "resolved origin url");
        Ok(url)
    }
}

/// First line of command output with a single trailing newline removed.
pub fn first_line(output: &[u8]) -> String {
    let text = String::from_utf8_lossy(output);
    match text.split_once('\n') {
        Some((line, _)) => line.to_string(),
        None => text.into_owned(),
    }
}

fn run(mut cmd: Command) -> Result<Vec<u8>> {
    let output = cmd.output().context("run command")?;
    if output.status.success() {
        return Ok(output.stdout);
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr: Vec<&str> = stderr.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    bail!("reading from git failed ({}): {}", output.status, stderr.join("; "));
}
