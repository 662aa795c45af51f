//! Secret store access: one record per repository key.
//!
//! The OS keychain is reached through the `keyring` crate. Each record lives in
//! a single keychain entry whose service is the repository key; the entry's
//! secret is a small JSON document carrying the label, description, account
//! name, and password, so the account survives on every platform backend.

use crate::constants;
use crate::models::credential::CredentialRecord;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// Generic-password storage addressed by repository key.
pub trait SecretStore {
    /// Look up the record for `repository_key`. `Ok(None)` means not found.
    ///
    /// When `include_secret` is false the returned record has no secret.
    fn find(&self, repository_key: &str, include_secret: bool) -> Result<Option<CredentialRecord>>;

    /// Insert a new record holding `username` (possibly empty) and `secret`.
    fn create(&self, repository_key: &str, username: &str, secret: &str) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct StoredPayload {
    label: String,
    description: String,
    account: String,
    secret: String,
}

impl Drop for StoredPayload {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// Serialize a record into the bytes kept in the keychain entry.
pub fn encode_payload(
    repository_key: &str,
    username: &str,
    secret: &str,
) -> Result<Zeroizing<Vec<u8>>> {
    let payload = StoredPayload {
        label: repository_key.to_string(),
        description: constants::RECORD_DESCRIPTION.to_string(),
        account: username.to_string(),
        secret: secret.to_string(),
    };
    let bytes = serde_json::to_vec(&payload).context("serialize keychain record")?;
    Ok(Zeroizing::new(bytes))
}

/// Parse keychain entry bytes back into a record.
///
/// An empty payload is rejected; an empty account name is valid.
pub fn decode_payload(
    repository_key: &str,
    bytes: &[u8],
    include_secret: bool,
) -> Result<CredentialRecord> {
    if bytes.is_empty() {
        bail!("keychain record for {} is empty", repository_key);
    }
    let mut payload: StoredPayload = serde_json::from_slice(bytes)
        .with_context(|| format!("parse keychain record for {}", repository_key))?;
    let secret = include_secret.then(|| Zeroizing::new(std::mem::take(&mut payload.secret)));
    Ok(CredentialRecord::new(
        repository_key,
        std::mem::take(&mut payload.account),
        secret,
    ))
}

/// OS keychain backed store.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    entry_user: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            entry_user: constants::KEYRING_ENTRY_USER.to_string(),
        }
    }

    fn entry(&self, repository_key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(repository_key, &self.entry_user)
            .with_context(|| format!("open keychain entry for {}", repository_key))
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for KeyringStore {
    fn find(&self, repository_key: &str, include_secret: bool) -> Result<Option<CredentialRecord>> {
        find_in_entry(&self.entry(repository_key)?, repository_key, include_secret)
    }

    fn create(&self, repository_key: &str, username: &str, secret: &str) -> Result<()> {
        create_in_entry(&self.entry(repository_key)?, repository_key, username, secret)
    }
}

fn find_in_entry(
    entry: &keyring::Entry,
    repository_key: &str,
    include_secret: bool,
) -> Result<Option<CredentialRecord>> {
    match entry.get_secret() {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let record = decode_payload(repository_key, &bytes, include_secret)?;
            debug!(repository = repository_key, include_secret, "keychain record found");
            Ok(Some(record))
        }
        Err(keyring::Error::NoEntry) => {
            debug!(repository = repository_key, "no keychain record");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("read keychain record for {}", repository_key)),
    }
}

fn create_in_entry(
    entry: &keyring::Entry,
    repository_key: &str,
    username: &str,
    secret: &str,
) -> Result<()> {
    let payload = encode_payload(repository_key, username, secret)?;
    entry
        .set_secret(&payload)
        .with_context(|| format!("create keychain record for {}", repository_key))?;
    debug!(repository = repository_key, "keychain record created");
    Ok(())
}

/// In-process store with call counters and error injection.
///
/// Records are kept in their encoded form, so lookups go through the same
/// decoding path as the keychain.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Zeroizing<Vec<u8>>>>,
    find_calls: AtomicUsize,
    create_calls: AtomicUsize,

    /// Message to fail `find()` with.
    pub find_error: Option<String>,
    /// Message to fail `create()` with.
    pub create_error: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a record.
    pub fn with_record(self, repository_key: &str, username: &str, secret: &str) -> Result<Self> {
        let payload = encode_payload(repository_key, username, secret)?;
        self.lock()?.insert(repository_key.to_string(), payload);
        Ok(self)
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Zeroizing<Vec<u8>>>>> {
        self.records
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

impl SecretStore for MemoryStore {
    fn find(&self, repository_key: &str, include_secret: bool) -> Result<Option<CredentialRecord>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.find_error {
            bail!("{}", message);
        }
        let records = self.lock()?;
        records
            .get(repository_key)
            .map(|bytes| decode_payload(repository_key, bytes, include_secret))
            .transpose()
    }

    fn create(&self, repository_key: &str, username: &str, secret: &str) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.create_error {
            bail!("{}", message);
        }
        let payload = encode_payload(repository_key, username, secret)?;
        self.lock()?.insert(repository_key.to_string(), payload);
        Ok(())
    }
}
