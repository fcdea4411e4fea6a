//! Record store - website credentials persisted as a JSON object
//!
//! The whole mapping lives in memory and is written back in full after every
//! add or delete. File layout:
//!
//! ```json
//! {
//!   "example.com": { "username": "alice", "password": "<base64 ciphertext>" }
//! }
//! ```

use crate::cipher::Cipher;
use crate::error::{PasswordError, Result};
use crate::keystore::write_private;
use crate::policy::PasswordPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A stored entry; the password is ciphertext text, never plaintext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub username: String,
    pub password: String,
}

/// A decrypted credential returned by [`RecordStore::get`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub website: String,
    pub username: String,
    pub password: String,
}

/// In-memory mapping of website to record, bound to its backing file
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: BTreeMap<String, Record>,
    policy: PasswordPolicy,
    recovered: bool,
}

impl RecordStore {
    /// Load the store from `path`.
    ///
    /// A missing or empty file yields an empty store. So does a file that is
    /// not valid JSON; in that case a warning is logged and
    /// [`RecordStore::recovered_from_corrupt`] returns true. The broken file
    /// stays on disk until the next mutation overwrites it.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut store = Self {
            path,
            records: BTreeMap::new(),
            policy: PasswordPolicy::new(),
            recovered: false,
        };

        let content = match fs::read_to_string(&store.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %store.path.display(), "no record file yet, starting empty");
                return Ok(store);
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!(path = %store.path.display(), "record file is not UTF-8, starting empty");
                store.recovered = true;
                return Ok(store);
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(store);
        }

        match serde_json::from_str::<BTreeMap<String, Record>>(&content) {
            Ok(records) => {
                tracing::debug!(path = %store.path.display(), count = records.len(), "loaded records");
                store.records = records;
            }
            Err(e) => {
                tracing::warn!(
                    path = %store.path.display(),
                    error = %e,
                    "record file is corrupt, starting with an empty store"
                );
                store.recovered = true;
            }
        }

        Ok(store)
    }

    /// Write the full mapping to the backing file, replacing its contents
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        write_private(&self.path, json.as_bytes())?;
        tracing::debug!(path = %self.path.display(), count = self.records.len(), "saved records");
        Ok(())
    }

    /// Encrypt and store a new credential.
    ///
    /// Rejects a website that already has a record before looking at the
    /// password, then rejects passwords that fail the composition rule.
    pub fn add(&mut self, website: &str, username: &str, password: &str, cipher: &Cipher) -> Result<()> {
        if self.records.contains_key(website) {
            return Err(PasswordError::DuplicateWebsite(website.to_string()));
        }
        self.policy.check(password)?;

        let record = Record {
            username: username.to_string(),
            password: cipher.encrypt(password)?,
        };
        self.records.insert(website.to_string(), record);

        if let Err(e) = self.save() {
            self.records.remove(website);
            return Err(e);
        }
        Ok(())
    }

    /// Look up and decrypt the credential for a website
    pub fn get(&self, website: &str, cipher: &Cipher) -> Result<Credential> {
        let record = self
            .records
            .get(website)
            .ok_or_else(|| PasswordError::NotFound(website.to_string()))?;

        let password = cipher.decrypt(&record.password)?;

        Ok(Credential {
            website: website.to_string(),
            username: record.username.clone(),
            password,
        })
    }

    /// Remove the record for a website and persist the change
    pub fn delete(&mut self, website: &str) -> Result<()> {
        let record = self
            .records
            .remove(website)
            .ok_or_else(|| PasswordError::NotFound(website.to_string()))?;

        if let Err(e) = self.save() {
            self.records.insert(website.to_string(), record);
            return Err(e);
        }
        Ok(())
    }

    pub fn contains(&self, website: &str) -> bool {
        self.records.contains_key(website)
    }

    /// The raw stored record, password still encrypted
    pub fn record(&self, website: &str) -> Option<&Record> {
        self.records.get(website)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`RecordStore::load`] discarded an unreadable record file
    pub fn recovered_from_corrupt(&self) -> bool {
        self.recovered
    }
}
