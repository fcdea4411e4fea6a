//! Interactive menu loop
//!
//! Reads one choice per line, runs the matching store operation, prints the
//! outcome and asks again. Only "4" (or end of input) leaves the loop.
//!
//! Input, output and the masked password prompt are injected so the loop can
//! be driven from tests without a terminal.

use crate::cipher::Cipher;
use crate::clipboard::Clipboard;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Source of passwords typed without echo
pub trait PasswordPrompt {
    fn prompt_password(&mut self, prompt: &str) -> std::io::Result<String>;
}

/// Reads passwords from the controlling terminal with echo disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn prompt_password(&mut self, prompt: &str) -> std::io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

/// Menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Add,
    Get,
    Delete,
    Quit,
}

impl Choice {
    /// Parse a menu selection ("1" through "4")
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Get),
            "3" => Some(Self::Delete),
            "4" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Loop state after each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MenuPrompt,
    Terminated,
}

/// The interactive password manager session
pub struct CommandLoop<R, W, P> {
    store: RecordStore,
    cipher: Cipher,
    clipboard: Clipboard,
    input: R,
    output: W,
    prompt: P,
}

impl<R: BufRead, W: Write, P: PasswordPrompt> CommandLoop<R, W, P> {
    pub fn new(
        store: RecordStore,
        cipher: Cipher,
        clipboard: Clipboard,
        input: R,
        output: W,
        prompt: P,
    ) -> Self {
        Self {
            store,
            cipher,
            clipboard,
            input,
            output,
            prompt,
        }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> Result<()> {
        if self.store.recovered_from_corrupt() {
            writeln!(
                self.output,
                "warning: {} could not be parsed; starting with an empty store. \
                 It will be overwritten on the next change.",
                self.store.path().display()
            )?;
        }

        while self.step()? == State::MenuPrompt {}
        Ok(())
    }

    /// Show the menu once and handle a single choice
    pub fn step(&mut self) -> Result<State> {
        writeln!(self.output)?;
        writeln!(self.output, "Password Manager Menu:")?;
        writeln!(self.output, "1. Add a password")?;
        writeln!(self.output, "2. Get a password")?;
        writeln!(self.output, "3. Delete a password")?;
        writeln!(self.output, "4. Quit")?;

        let Some(line) = self.read_line("Enter your choice (1-4): ")? else {
            return self.quit();
        };

        match Choice::parse(&line) {
            Some(Choice::Add) => self.cmd_add(),
            Some(Choice::Get) => self.cmd_get(),
            Some(Choice::Delete) => self.cmd_delete(),
            Some(Choice::Quit) => self.quit(),
            None => {
                writeln!(self.output, "error: Invalid choice. Please try again.")?;
                Ok(State::MenuPrompt)
            }
        }
    }

    /// Give back the store, e.g. to inspect it after a scripted session
    pub fn into_store(self) -> RecordStore {
        self.store
    }

    fn quit(&mut self) -> Result<State> {
        writeln!(self.output, "Exiting...")?;
        Ok(State::Terminated)
    }

    /// Prompt and read one line; None at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn cmd_add(&mut self) -> Result<State> {
        let Some(website) = self.read_line("Enter website: ")? else {
            return self.quit();
        };
        let Some(username) = self.read_line("Enter username: ")? else {
            return self.quit();
        };

        self.output.flush()?;
        let password = match self.prompt.prompt_password("Enter password: ") {
            Ok(password) => password,
            Err(e) => {
                writeln!(self.output, "error: Failed to read password: {}", e)?;
                return Ok(State::MenuPrompt);
            }
        };

        match self.store.add(&website, &username, &password, &self.cipher) {
            Ok(()) => writeln!(
                self.output,
                "success: Password for {} added successfully.",
                website
            )?,
            Err(e) => writeln!(self.output, "error: {}", e)?,
        }

        Ok(State::MenuPrompt)
    }

    fn cmd_get(&mut self) -> Result<State> {
        let Some(website) = self.read_line("Enter website: ")? else {
            return self.quit();
        };

        let credential = match self.store.get(&website, &self.cipher) {
            Ok(credential) => credential,
            Err(e) => {
                writeln!(self.output, "error: {}", e)?;
                return Ok(State::MenuPrompt);
            }
        };

        writeln!(self.output, "Website: {}", credential.website)?;
        writeln!(self.output, "Username: {}", credential.username)?;

        if self.clipboard.is_available() {
            match self.clipboard.copy(&credential.password) {
                Ok(()) => {
                    writeln!(self.output, "Password has been copied to the clipboard.")?;
                    return Ok(State::MenuPrompt);
                }
                Err(e) => {
                    tracing::debug!(backend = self.clipboard.name(), error = %e, "clipboard copy failed");
                    writeln!(self.output, "warning: Could not copy to clipboard: {}", e)?;
                }
            }
        }

        writeln!(self.output, "Password: {}", credential.password)?;
        Ok(State::MenuPrompt)
    }

    fn cmd_delete(&mut self) -> Result<State> {
        let Some(website) = self.read_line("Enter website: ")? else {
            return self.quit();
        };

        match self.store.delete(&website) {
            Ok(()) => writeln!(
                self.output,
                "success: Password for {} deleted successfully.",
                website
            )?,
            Err(e) => writeln!(self.output, "error: {}", e)?,
        }

        Ok(State::MenuPrompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keystore::EncryptionKey;
    use std::collections::VecDeque;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Scripted(VecDeque<String>);

    impl PasswordPrompt for Scripted {
        fn prompt_password(&mut self, _prompt: &str) -> std::io::Result<String> {
            self.0
                .pop_front()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no password"))
        }
    }

    fn session(
        temp: &TempDir,
        input: &str,
        passwords: &[&str],
    ) -> CommandLoop<Cursor<Vec<u8>>, Vec<u8>, Scripted> {
        let store = RecordStore::load(temp.path().join("passwords.json")).unwrap();
        CommandLoop::new(
            store,
            Cipher::new(&EncryptionKey::from_bytes([3u8; 32])),
            Clipboard::None,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Scripted(passwords.iter().map(|p| p.to_string()).collect()),
        )
    }

    fn output(session: &CommandLoop<Cursor<Vec<u8>>, Vec<u8>, Scripted>) -> String {
        String::from_utf8(session.output.clone()).unwrap()
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("1"), Some(Choice::Add));
        assert_eq!(Choice::parse(" 2 \n"), Some(Choice::Get));
        assert_eq!(Choice::parse("3"), Some(Choice::Delete));
        assert_eq!(Choice::parse("4"), Some(Choice::Quit));
        assert_eq!(Choice::parse("5"), None);
        assert_eq!(Choice::parse("add"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn test_quit() {
        let temp = TempDir::new().unwrap();
        let mut session = session(&temp, "4\n", &[]);

        assert_eq!(session.step().unwrap(), State::Terminated);
        assert!(output(&session).contains("Exiting..."));
    }

    #[test]
    fn test_invalid_choice_keeps_prompting() {
        let temp = TempDir::new().unwrap();
        let mut session = session(&temp, "9\n4\n", &[]);

        assert_eq!(session.step().unwrap(), State::MenuPrompt);
        assert!(output(&session).contains("error: Invalid choice. Please try again."));
        assert_eq!(session.step().unwrap(), State::Terminated);
    }

    #[test]
    fn test_end_of_input_quits() {
        let temp = TempDir::new().unwrap();
        let mut session = session(&temp, "", &[]);
        session.run().unwrap();
        assert!(output(&session).contains("Exiting..."));
    }

    #[test]
    fn test_add_get_delete() {
        let temp = TempDir::new().unwrap();
        let script = "1\nexample.com\nalice\n2\nexample.com\n3\nexample.com\n2\nexample.com\n4\n";
        let mut session = session(&temp, script, &["Abcdef1$"]);
        session.run().unwrap();

        let out = output(&session);
        assert!(out.contains("success: Password for example.com added successfully."));
        assert!(out.contains("Website: example.com"));
        assert!(out.contains("Username: alice"));
        assert!(out.contains("Password: Abcdef1$"));
        assert!(out.contains("success: Password for example.com deleted successfully."));
        assert!(out.contains("error: No password found for example.com"));
        assert!(session.into_store().is_empty());
    }

    #[test]
    fn test_add_rejects_weak_password() {
        let temp = TempDir::new().unwrap();
        let mut session = session(&temp, "1\nexample.com\nalice\n4\n", &["Abc12345"]);
        session.run().unwrap();

        let out = output(&session);
        assert!(out.contains("error: Password does not meet the requirements."));
        assert!(out.contains("at least 8 characters long"));
        assert!(!session.into_store().contains("example.com"));
    }

    #[test]
    fn test_password_prompt_failure_returns_to_menu() {
        let temp = TempDir::new().unwrap();
        let mut session = session(&temp, "1\nexample.com\nalice\n4\n", &[]);
        session.run().unwrap();

        let out = output(&session);
        assert!(out.contains("error: Failed to read password"));
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn test_corrupt_store_warning() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("passwords.json"), "{{{").unwrap();

        let mut session = session(&temp, "4\n", &[]);
        session.run().unwrap();
        assert!(output(&session).starts_with("warning: "));
    }
}
