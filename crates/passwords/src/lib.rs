//! passwords - Local password manager for Daedalos
//!
//! "Remember one file, not fifty passwords."
//!
//! Website credentials live in a JSON file next to a symmetric key. Usernames
//! are stored as-is, passwords are sealed with ChaCha20-Poly1305 before they
//! ever touch disk. The `passwords` binary wraps the store in a small numbered
//! menu.

pub mod clipboard;
pub mod cipher;
pub mod config;
pub mod error;
pub mod keystore;
pub mod menu;
pub mod policy;
pub mod store;

pub use cipher::Cipher;
pub use clipboard::Clipboard;
pub use config::Config;
pub use error::{PasswordError, Result};
pub use keystore::{EncryptionKey, KeyStore};
pub use menu::{CommandLoop, PasswordPrompt};
pub use policy::PasswordPolicy;
pub use store::{Credential, Record, RecordStore};
