//! Output routing: where the prompt and the suggestion end up.
//!
//! Explicit mode flags beat configuration flags, and a non-terminal stdout
//! always degrades to plain emission so piping and redirection stay clean.

use std::io::Write;

use async_trait::async_trait;

use crate::backend::ChainExhausted;
use crate::config::Config;
use crate::error::{ClipboardError, CommitFlowError, RouteError};

/// Produces the suggestion text (fallback chain + filter pipeline).
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ChainExhausted>;
}

/// Copies text to the system clipboard.
pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Opens the commit flow pre-filled with a template.
pub trait CommitFlow {
    fn open(&self, template: &str) -> Result<(), CommitFlowError>;
}

/// Invocation-mode flags picked off the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunMode {
    /// Route the prompt itself; never query a model.
    pub prompt_only: bool,
    /// Route only the generated message; skip prompt copying.
    pub result_only: bool,
}

/// One-shot decision procedure over the routing context.
pub struct Router<'a> {
    config: &'a Config,
    mode: RunMode,
    stdout_is_tty: bool,
}

impl<'a> Router<'a> {
    pub fn new(config: &'a Config, mode: RunMode, stdout_is_tty: bool) -> Self {
        Self {
            config,
            mode,
            stdout_is_tty,
        }
    }

    /// Dispose of the prompt and (unless skipped) the generated result.
    pub async fn route(
        &self,
        prompt: &str,
        out: &mut impl Write,
        generator: &impl Generator,
        clipboard: &impl Clipboard,
        commit: &impl CommitFlow,
    ) -> Result<(), RouteError> {
        if self.mode.prompt_only {
            if !self.stdout_is_tty {
                return emit(out, prompt);
            }
            self.warn_if_oversized(prompt);
            self.copy_or_print(clipboard, prompt, out)?;
            eprintln!("Model query skipped (prompt-only mode).");
            return Ok(());
        }

        if self.config.copy_prompt && !self.mode.result_only && self.stdout_is_tty {
            self.warn_if_oversized(prompt);
            self.copy_or_print(clipboard, prompt, out)?;
        }

        if !self.config.query_language_model {
            eprintln!("Model query disabled by configuration; skipping.");
            return Ok(());
        }

        let result = generator
            .generate(prompt)
            .await
            .map_err(RouteError::Generation)?;

        if !self.stdout_is_tty {
            return emit(out, &result);
        }

        if self.mode.result_only {
            self.copy_or_print(clipboard, &result, out)?;
            return Ok(());
        }

        if self.config.copy_result {
            self.copy_or_print(clipboard, &result, out)?;
        }

        if self.config.commit_with_template {
            commit.open(&result).map_err(RouteError::Commit)?;
            return Ok(());
        }

        emit(out, &result)
    }

    fn warn_if_oversized(&self, prompt: &str) {
        let length = prompt.chars().count();
        if length > self.config.interactive_prompt_limit {
            eprintln!(
                "Warning: the prompt is {length} characters (limit {}); consider --short for a truncated diff.",
                self.config.interactive_prompt_limit
            );
        }
    }

    /// Clipboard trouble is never fatal: warn and print the text instead.
    fn copy_or_print(
        &self,
        clipboard: &impl Clipboard,
        text: &str,
        out: &mut impl Write,
    ) -> Result<(), RouteError> {
        match clipboard.copy(text) {
            Ok(()) => {
                eprintln!("Copied to clipboard.");
                Ok(())
            }
            Err(e) => {
                eprintln!("Warning: clipboard copy failed ({e}); printing instead.");
                emit(out, text)
            }
        }
    }
}

/// Write the text verbatim, newline-terminated.
fn emit(out: &mut impl Write, text: &str) -> Result<(), RouteError> {
    out.write_all(text.as_bytes()).map_err(RouteError::Io)?;
    if !text.ends_with('\n') {
        out.write_all(b"\n").map_err(RouteError::Io)?;
    }
    Ok(())
}
