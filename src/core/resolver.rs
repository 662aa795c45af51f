//! Lookup-or-prompt resolution of the field git asked for.

use crate::constants;
use crate::core::secret_store::SecretStore;
use crate::models::credential::RequestedField;
use crate::util::prompt::Prompter;
use anyhow::{anyhow, Result};
use tracing::info;
use zeroize::Zeroizing;

pub struct CredentialResolver<'a> {
    store: &'a dyn SecretStore,
    prompter: &'a dyn Prompter,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(store: &'a dyn SecretStore, prompter: &'a dyn Prompter) -> Self {
        Self { store, prompter }
    }

    pub fn resolve(
        &self,
        field: RequestedField,
        repository_key: &str,
        prompt_text: &str,
    ) -> Result<Zeroizing<String>> {
        match field {
            RequestedField::Username => self.resolve_username(repository_key, prompt_text),
            RequestedField::Password => self.resolve_password(repository_key, prompt_text),
        }
    }

    /// Stored username, or prompt for username and password and store both.
    ///
    /// A record created by an earlier password request has an empty username,
    /// which is returned as is.
    pub fn resolve_username(
        &self,
        repository_key: &str,
        prompt_text: &str,
    ) -> Result<Zeroizing<String>> {
        if let Some(record) = self.store.find(repository_key, false)? {
            return Ok(Zeroizing::new(record.username));
        }

        info!(repository = repository_key, "no stored credential, prompting");
        let username = self.prompter.prompt(prompt_text)?;
        let password = self.prompter.prompt(constants::PASSWORD_PROMPT)?;
        self.store.create(repository_key, &username, &password)?;
        Ok(username)
    }

    /// Stored password, or prompt for a password and store it with an empty username.
    pub fn resolve_password(
        &self,
        repository_key: &str,
        prompt_text: &str,
    ) -> Result<Zeroizing<String>> {
        if let Some(record) = self.store.find(repository_key, true)? {
            return record
                .secret
                .ok_or_else(|| anyhow!("keychain record for {} has no secret", repository_key));
        }

        info!(repository = repository_key, "no stored credential, prompting");
        let password = self.prompter.prompt(prompt_text)?;
        self.store.create(repository_key, "", &password)?;
        Ok(password)
    }
}
