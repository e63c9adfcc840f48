//! System clipboard dispatch.
//!
//! No clipboard library: the platform copy command is found on PATH and fed
//! on stdin, so the tool works over SSH and in minimal environments exactly
//! as far as the environment itself does.

use std::io::Write as _;
use std::process::{Command, Stdio};

use crate::error::ClipboardError;
use crate::router::Clipboard;

/// Copy commands in probe order; the first one on PATH wins.
const CANDIDATES: &[&[&str]] = &[
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
    &["clip.exe"],
];

/// Clipboard backed by whatever copy command the platform provides.
pub struct SystemClipboard;

impl SystemClipboard {
    fn find_command() -> Option<&'static [&'static str]> {
        CANDIDATES
            .iter()
            .copied()
            .find(|candidate| which::which(candidate[0]).is_ok())
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let Some(candidate) = Self::find_command() else {
            return Err(ClipboardError::NoBackend);
        };
        let name = candidate[0];

        let mut child = Command::new(name)
            .args(&candidate[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ClipboardError::SpawnFailed {
                name: name.to_string(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|source| ClipboardError::SpawnFailed {
                    name: name.to_string(),
                    source,
                })?;
        }

        let status = child.wait().map_err(|source| ClipboardError::SpawnFailed {
            name: name.to_string(),
            source,
        })?;

        if !status.success() {
            return Err(ClipboardError::CopyFailed {
                name: name.to_string(),
                code: status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }
}
