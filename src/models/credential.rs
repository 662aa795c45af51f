use crate::constants;
use anyhow::{bail, Result};
use std::ffi::OsStr;
use std::fmt;
use zeroize::Zeroizing;

/// One stored credential, addressed by the repository's origin URL.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub repository_key: String,
    pub username: String,
    /// Absent when the record was fetched without its secret.
    pub secret: Option<Zeroizing<String>>,
}

impl CredentialRecord {
    pub fn new(
        repository_key: impl Into<String>,
        username: impl Into<String>,
        secret: Option<Zeroizing<String>>,
    ) -> Self {
        Self {
            repository_key: repository_key.into(),
            username: username.into(),
            secret,
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("repository_key", &self.repository_key)
            .field("username", &self.username)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Which credential field git asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedField {
    Username,
    Password,
}

impl RequestedField {
    /// Select the field from git's prompt text by its first eight bytes.
    ///
    /// Git passes prompts like `Username for 'https://host': `, so anything
    /// after the field name is ignored.
    /// The comparison is on raw bytes, so the prompt need not be UTF-8.
    pub fn from_prompt(prompt: impl AsRef<OsStr>) -> Result<Self> {
        let prompt = prompt.as_ref();
        let selector = prompt.as_encoded_bytes();
        let selector = &selector[..selector.len().min(constants::FIELD_SELECTOR_LEN)];
        match selector {
            b"Username" => Ok(Self::Username),
            b"Password" => Ok(Self::Password),
            _ => bail!(
                "Can only be used by git (prompts were bad: expected Username or Password, got '{}')",
                prompt.to_string_lossy().escape_debug()
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
        }
    }
}

impl fmt::Display for RequestedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_prompt_matches_git_prompts() {
        assert_eq!(
            RequestedField::from_prompt("Username for 'https://github.com': ").unwrap(),
            RequestedField::Username
        );
        assert_eq!(
            RequestedField::from_prompt("Password for 'https://alice@github.com': ").unwrap(),
            RequestedField::Password
        );
    }

    #[test]
    fn test_from_prompt_accepts_bare_and_colon_forms() {
        assert_eq!(RequestedField::from_prompt("Username").unwrap(), RequestedField::Username);
        assert_eq!(RequestedField::from_prompt("Username: ").unwrap(), RequestedField::Username);
        assert_eq!(RequestedField::from_prompt("Password: ").unwrap(), RequestedField::Password);
    }

    #[test]
    fn test_from_prompt_rejects_other_fields() {
        for bad in ["Token", "", "User", "username", "Passwor", "passphrase for key"] {
            let err = RequestedField::from_prompt(bad).unwrap_err();
            assert!(err.to_string().contains("prompts were bad"), "{}", bad);
            assert!(err.to_string().contains(&format!("got '{}'", bad)));
        }
    }

    #[test]
    fn test_from_prompt_error_stays_on_one_line() {
        let err = RequestedField::from_prompt("Pass\nword").unwrap_err();
        let message = err.to_string();
        assert!(!message.contains('\n'));
        assert!(message.contains("got 'Pass\\nword'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_from_prompt_accepts_non_utf8_suffix() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let prompt = OsString::from_vec(b"Password for '\xff': ".to_vec());
        assert_eq!(RequestedField::from_prompt(&prompt).unwrap(), RequestedField::Password);

        let bad = OsString::from_vec(b"Pass\xffword".to_vec());
        let err = RequestedField::from_prompt(&bad).unwrap_err();
        assert!(err.to_string().contains("prompts were bad"));
    }

    #[test]
    fn test_from_prompt_handles_multibyte_prefix() {
        // Slicing is byte-based; a non-ASCII prompt must not panic.
        assert!(RequestedField::from_prompt("Üsername for x").is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let record = CredentialRecord::new(
            "https://example.com/repo.git",
            "alice",
            Some(Zeroizing::new("secret123".to_string())),
        );
        let rendered = format!("{:?}", record);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret123"));
    }

    #[test]
    fn test_display() {
        assert_eq!(RequestedField::Username.to_string(), "Username");
        assert_eq!(RequestedField::Password.to_string(), "Password");
    }
}
