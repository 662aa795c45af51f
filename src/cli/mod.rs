//! Argument handling and dispatch for the askpass entry point.

use crate::core::resolver::CredentialResolver;
use crate::core::secret_store::SecretStore;
use crate::models::credential::RequestedField;
use crate::util::caller::CallerVerifier;
use crate::util::git::RepositoryIdentifier;
use crate::util::prompt::Prompter;
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use tracing::debug;

/// Collaborators passed to dispatch.
pub struct HelperContext<'a> {
    pub verifier: &'a dyn CallerVerifier,
    pub repository: &'a dyn RepositoryIdentifier,
    pub store: &'a dyn SecretStore,
    pub prompter: &'a dyn Prompter,
}

#[derive(Parser, Debug)]
#[command(
    name = "git-password",
    about = "Supplies git with repository credentials kept in the OS keychain",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Prompt text from git, e.g. "Username for 'https://host': "
    #[arg(num_args = 0.., allow_hyphen_values = true)]
    pub prompts: Vec<OsString>,
}

impl Cli {
    /// Exactly one prompt is accepted.
    pub fn prompt(&self) -> Result<&OsStr> {
        match self.prompts.as_slice() {
            [prompt] => Ok(prompt.as_os_str()),
            _ => bail!("Can only be used by git (wrong number of args)"),
        }
    }
}

/// Verify the caller, validate arguments, resolve the field, and write it to `out`.
///
/// `out` receives the value only once it is fully resolved, with no newline.
pub fn run<I, T>(ctx: &HelperContext<'_>, args: I, out: &mut dyn Write) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let parsed = Cli::try_parse_from(args);

    if !ctx.verifier.is_authorized_caller()? {
        bail!("Can only be used by git (git is not the caller)");
    }

    let cli = parsed.map_err(|_| anyhow::anyhow!("Can only be used by git (wrong number of args)"))?;
    let prompt = cli.prompt()?;
    let field = RequestedField::from_prompt(prompt)?;
    debug!(%field, "credential requested");

    let repository_key = ctx.repository.origin_url()?;
    let resolver = CredentialResolver::new(ctx.store, ctx.prompter);
    let value = resolver.resolve(field, &repository_key, &prompt.to_string_lossy())?;

    out.write_all(value.as_bytes())
        .and_then(|()| out.flush())
        .context("write credential to stdout")?;
    Ok(())
}

/// Render an error chain as the single `fatal:` line git shows the user.
pub fn fatal_line(err: &anyhow::Error) -> String {
    let message = format!("{:#}", err);
    let message: Vec<&str> = message.lines().map(str::trim_end).collect();
    format!("fatal: {}", message.join(" "))
}
