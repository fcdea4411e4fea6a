//! passwords - Local password manager for Daedalos
//!
//! Interactive menu over an encrypted credential file:
//! 1. Add a password
//! 2. Get a password
//! 3. Delete a password
//! 4. Quit

use anyhow::{Context, Result};
use clap::Parser;
use passwords::menu::TerminalPrompt;
use passwords::{Cipher, CommandLoop, Config, RecordStore};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "passwords")]
#[command(about = "Local password manager for Daedalos - encrypted website credentials behind an interactive menu")]
#[command(version)]
#[command(after_help = r#"FILES:
    encryption.key   Symmetric key, generated on first run (keep it safe)
    passwords.json   Website, username and encrypted password per entry

    Both default to the current directory. Override them in
    ~/.config/daedalos/passwords.yaml or with the flags above.

SECURITY:
    - Passwords are encrypted with ChaCha20-Poly1305
    - Losing encryption.key makes every stored password unreadable
    - New passwords need 8+ characters with upper, lower, digit and one of @#$%^&+="#)]
struct Cli {
    /// Config file (default: ~/.config/daedalos/passwords.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Encryption key file
    #[arg(long)]
    key_file: Option<PathBuf>,

    /// Password record file
    #[arg(long)]
    store: Option<PathBuf>,

    /// Print retrieved passwords instead of copying them to the clipboard
    #[arg(long)]
    no_clipboard: bool,
}

impl Cli {
    /// Load the config file and apply command-line overrides
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(key_file) = &self.key_file {
            config.key_path = key_file.clone();
        }
        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        if self.no_clipboard {
            config.clipboard = false;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let key_store = config.key_store();
    if !key_store.exists() {
        println!("info: Encryption key not found. Generating a new key...");
    }
    let key = key_store
        .load_or_generate()
        .context("Failed to load encryption key")?;

    let store = RecordStore::load(&config.store_path)
        .with_context(|| format!("Failed to load {}", config.store_path.display()))?;

    let stdin = io::stdin();
    let mut session = CommandLoop::new(
        store,
        Cipher::new(&key),
        config.clipboard_backend(),
        stdin.lock(),
        io::stdout(),
        TerminalPrompt,
    );

    session.run()
}
