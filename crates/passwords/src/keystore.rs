//! Key storage - the symmetric key that seals every stored password
//!
//! The key is 32 random bytes written verbatim to a single file. It is created
//! once, on first run, and never rotated. Losing or replacing the file makes
//! every stored password unreadable.

use crate::error::{PasswordError, Result};
use chacha20poly1305::aead::{KeyInit, OsRng};
use chacha20poly1305::ChaCha20Poly1305;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key length required by ChaCha20-Poly1305
pub const KEY_LEN: usize = 32;

/// A symmetric encryption key, wiped from memory on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// Generate a fresh key from the OS random number generator
    pub fn generate() -> Self {
        let key = ChaCha20Poly1305::generate_key(&mut OsRng);
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(key.as_slice());
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(<redacted>)")
    }
}

/// File-backed key storage
#[derive(Debug, Clone)]
pub struct KeyStore {
    /// Path to the raw key file
    path: PathBuf,
}

impl KeyStore {
    /// Create a key store for the given key file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a key file is present
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Generate a new key and write it to the key file, replacing any existing one
    pub fn generate(&self) -> Result<()> {
        let key = EncryptionKey::generate();
        write_private(&self.path, key.as_bytes())?;
        tracing::info!(path = %self.path.display(), "generated new encryption key");
        Ok(())
    }

    /// Read the key file
    pub fn load(&self) -> Result<EncryptionKey> {
        let mut bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PasswordError::KeyNotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.len() != KEY_LEN {
            let found = bytes.len();
            bytes.zeroize();
            return Err(PasswordError::InvalidKey {
                path: self.path.clone(),
                expected: KEY_LEN,
                found,
            });
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(EncryptionKey::from_bytes(key))
    }

    /// Load the key, generating it first if the file does not exist yet.
    ///
    /// This is a one-shot bootstrap: a failure to generate, or to read back
    /// the freshly generated key, is returned to the caller as-is.
    pub fn load_or_generate(&self) -> Result<EncryptionKey> {
        match self.load() {
            Err(PasswordError::KeyNotFound(_)) => {
                self.generate()?;
                self.load()
            }
            other => other,
        }
    }
}

/// Write `contents` to `path`, truncating it, readable by the owner only.
pub(crate) fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // mode() only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.flush()?;
    Ok(())
}
