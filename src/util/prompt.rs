//! Interactive prompting on the controlling terminal.

use anyhow::{Context, Result};
use dialoguer::Password;
use zeroize::Zeroizing;

/// Reads one line of hidden input after showing `text`.
pub trait Prompter {
    fn prompt(&self, text: &str) -> Result<Zeroizing<String>>;
}

/// Hidden-input prompt on the terminal via `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&self, text: &str) -> Result<Zeroizing<String>> {
        let value = Password::new()
            .with_prompt(prompt_label(text))
            .allow_empty_password(true)
            .interact()
            .with_context(|| format!("read '{}' from terminal", prompt_label(text)))?;
        Ok(Zeroizing::new(value))
    }
}

/// Git's prompt text without its trailing `": "`; the renderer adds its own.
pub fn prompt_label(text: &str) -> &str {
    text.trim_end().trim_end_matches(':')
}
