//! Clipboard backends for different platforms
//!
//! There is no portable clipboard API, so the value is piped into whichever
//! platform tool is installed. When none is found the caller falls back to
//! printing the password.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Available clipboard backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clipboard {
    /// macOS pbcopy
    Pbcopy,
    /// Wayland wl-copy
    WlCopy,
    /// X11 xclip
    Xclip,
    /// X11 xsel
    Xsel,
    /// Windows / WSL clip.exe
    Clip,
    /// No clipboard available (or disabled)
    None,
}

impl Clipboard {
    /// Detect the best available backend for the current platform
    pub fn detect() -> Self {
        #[cfg(target_os = "macos")]
        {
            if Self::command_exists("pbcopy") {
                return Self::Pbcopy;
            }
            return Self::None;
        }

        #[cfg(target_os = "linux")]
        {
            // Check if running in WSL
            if std::env::var("WSL_DISTRO_NAME").is_ok() {
                return Self::Clip;
            }
            if std::env::var("WAYLAND_DISPLAY").is_ok() && Self::command_exists("wl-copy") {
                return Self::WlCopy;
            }
            if std::env::var("DISPLAY").is_ok() {
                if Self::command_exists("xclip") {
                    return Self::Xclip;
                }
                if Self::command_exists("xsel") {
                    return Self::Xsel;
                }
            }
            return Self::None;
        }

        #[cfg(target_os = "windows")]
        {
            Self::Clip
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            Self::None
        }
    }

    /// Check if a command exists
    #[allow(dead_code)]
    fn command_exists(cmd: &str) -> bool {
        Command::new("which")
            .arg(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Get the name of this backend
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pbcopy => "pbcopy",
            Self::WlCopy => "wl-copy",
            Self::Xclip => "xclip",
            Self::Xsel => "xsel",
            Self::Clip => "clip.exe",
            Self::None => "none",
        }
    }

    pub fn is_available(&self) -> bool {
        *self != Self::None
    }

    fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Xclip => &["-selection", "clipboard"],
            Self::Xsel => &["--clipboard", "--input"],
            _ => &[],
        }
    }

    /// Place `text` on the clipboard
    pub fn copy(&self, text: &str) -> Result<()> {
        if !self.is_available() {
            bail!("No clipboard available");
        }

        pipe_to(self.name(), self.args(), text)
    }
}

/// Run `program` and feed `text` to its stdin. The child is always reaped.
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {}", program))?;

    let written = match child.stdin.take() {
        // Dropping stdin closes it so the tool sees EOF
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "process has no stdin",
        )),
    };

    if let Err(e) = written {
        let _ = child.kill();
        let _ = child.wait();
        return Err(e).with_context(|| format!("Failed to write to {}", program));
    }

    let status = child.wait()?;
    if !status.success() {
        bail!("{} failed with status: {}", program, status);
    }
    Ok(())
}
