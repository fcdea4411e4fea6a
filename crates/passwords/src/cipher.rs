//! Authenticated encryption for stored passwords
//!
//! Each password is sealed with ChaCha20-Poly1305 under a fresh random nonce.
//! The stored text is `base64(nonce ‖ ciphertext ‖ tag)`, so the same password
//! encrypts differently every time and any modification fails authentication.

use crate::error::{PasswordError, Result};
use crate::keystore::EncryptionKey;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};

/// ChaCha20-Poly1305 nonce length in bytes
pub const NONCE_LEN: usize = 12;

/// Poly1305 tag length in bytes
pub const TAG_LEN: usize = 16;

/// Encrypts and decrypts password strings with a single key
pub struct Cipher {
    aead: ChaCha20Poly1305,
}

impl Cipher {
    pub fn new(key: &EncryptionKey) -> Self {
        let aead = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
        Self { aead }
    }

    /// Encrypt a plaintext password into storable text
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .aead
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| PasswordError::Encryption(e.to_string()))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(blob))
    }

    /// Decrypt text produced by [`Cipher::encrypt`].
    ///
    /// Fails without returning any plaintext if the text is malformed, was
    /// sealed under another key, or has been modified.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        let blob = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| PasswordError::Decryption(format!("malformed ciphertext: {}", e)))?;

        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(PasswordError::Decryption(
                "ciphertext too short".to_string(),
            ));
        }

        let (nonce, sealed) = blob.split_at(NONCE_LEN);
        let plaintext = self
            .aead
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| {
                PasswordError::Decryption("wrong key or tampered data".to_string())
            })?;

        String::from_utf8(plaintext)
            .map_err(|_| PasswordError::Decryption("password is not valid UTF-8".to_string()))
    }
}
