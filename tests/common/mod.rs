#![allow(dead_code)]

use anyhow::{anyhow, Result};
use git_password::util::caller::CallerVerifier;
use git_password::util::git::RepositoryIdentifier;
use git_password::util::prompt::Prompter;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use zeroize::Zeroizing;

pub const KEY: &str = "https://github.com/example/project.git";

pub struct FixedCaller(pub bool);

impl CallerVerifier for FixedCaller {
    fn is_authorized_caller(&self) -> Result<bool> {
        Ok(self.0)
    }
}

pub struct FailingCaller;

impl CallerVerifier for FailingCaller {
    fn is_authorized_caller(&self) -> Result<bool> {
        Err(anyhow!("unable to read the process table"))
    }
}

/// Repository key source that counts lookups.
pub struct FixedRepository {
    pub url: Option<String>,
    pub calls: Cell<usize>,
}

impl FixedRepository {
    pub fn new(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            calls: Cell::new(0),
        }
    }

    pub fn missing() -> Self {
        Self {
            url: None,
            calls: Cell::new(0),
        }
    }
}

impl RepositoryIdentifier for FixedRepository {
    fn origin_url(&self) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.url
            .clone()
            .ok_or_else(|| anyhow!("run git config remote.origin.url: reading from git failed"))
    }
}

/// Answers prompts from a fixed script, failing on any extra prompt.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    pub seen: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, text: &str) -> Result<Zeroizing<String>> {
        self.seen.borrow_mut().push(text.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .map(Zeroizing::new)
            .ok_or_else(|| anyhow!("unexpected prompt: {}", text))
    }
}

/// Fails the test if anything prompts.
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn prompt(&self, text: &str) -> Result<Zeroizing<String>> {
        panic!("prompted unexpectedly: {}", text);
    }
}
