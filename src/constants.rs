//! Centralized constants for process names, keys, and exit codes.

/// Command name of git's HTTPS transport helper, the only accepted caller.
pub const TRANSPORT_HELPER_NAME: &str = "git-remote-https";

/// Linux stores at most this many bytes of a command name (TASK_COMM_LEN - 1).
pub const LINUX_COMM_MAX_LEN: usize = 15;

/// Git configuration key whose value addresses a stored credential.
pub const ORIGIN_URL_KEY: &str = "remote.origin.url";

/// Human-readable description attached to every keychain record.
pub const RECORD_DESCRIPTION: &str = "git repository password";

/// Account slot used to address keychain entries; the real account name lives in the payload.
pub const KEYRING_ENTRY_USER: &str = "git-password";

/// Number of leading bytes of the argument compared against the field names.
pub const FIELD_SELECTOR_LEN: usize = 8;

/// Prompt shown for the follow-up password after a username was entered.
pub const PASSWORD_PROMPT: &str = "Password: ";

/// Exit status for any fatal condition (`-1` truncated to 8 bits).
pub const FATAL_EXIT_CODE: u8 = 255;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "GIT_PASSWORD_LOG";
