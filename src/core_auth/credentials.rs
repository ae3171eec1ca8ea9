use crate::core_auth::error::CredentialError;
use crate::core_fs::is_valid_username;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

/// A stored login. The password is compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parses a `username:password` line.
    pub fn from_line(line: &str) -> Option<Self> {
        let (username, password) = line.split_once(':')?;
        if username.is_empty() {
            return None;
        }
        Some(Self::new(username, password))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn matches(&self, password: &str) -> bool {
        self.password.as_bytes() == password.as_bytes()
    }
}

/// Read-only lookup of stored credentials by user name.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, username: &str) -> Option<Credential>;
}

/// Credentials loaded once from a passwd-style file.
#[derive(Debug, Default)]
pub struct PasswdStore {
    entries: HashMap<String, Credential>,
}

impl PasswdStore {
    pub fn from_entries<I>(entries: I) -> Result<Self, CredentialError>
    where
        I: IntoIterator<Item = Credential>,
    {
        let mut map = HashMap::new();
        for entry in entries {
            let username = entry.username().to_string();
            if map.insert(username.clone(), entry).is_some() {
                return Err(CredentialError::DuplicateUser(username));
            }
        }
        Ok(Self { entries: map })
    }

    pub fn parse(content: &str) -> Result<Self, CredentialError> {
        let mut entries = Vec::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            match Credential::from_line(line) {
                Some(entry) if is_valid_username(entry.username()) => entries.push(entry),
                Some(entry) => warn!(
                    "Skipping passwd line {}: user name {:?} is not allowed",
                    number + 1,
                    entry.username()
                ),
                None => warn!("Skipping malformed passwd line {}", number + 1),
            }
        }
        Self::from_entries(entries)
    }

    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        let content = std::fs::read_to_string(path).map_err(|source| CredentialError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(&content)?;
        info!("Loaded {} user(s) from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialStore for PasswdStore {
    fn lookup(&self, username: &str) -> Option<Credential> {
        self.entries.get(username).cloned()
    }
}
