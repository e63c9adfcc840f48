//! Error types for penna modules using thiserror.

use thiserror::Error;

use crate::backend::chain::ChainExhausted;

/// Errors from configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Config key '{key}' entry {index} is an empty command; each entry needs at least an executable name"
    )]
    EmptyCommand { key: &'static str, index: usize },
}

/// Errors from staged-change and history collection.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    HistoryFailed(#[source] git2::Error),

    #[error("No staged changes. Stage files with 'git add' first.")]
    NoStagedChanges,
}

/// Errors from clipboard dispatch. Never fatal to the caller.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard command found (looked for pbcopy, wl-copy, xclip, xsel, clip.exe)")]
    NoBackend,

    #[error("failed to run clipboard command '{name}': {source}")]
    SpawnFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard command '{name}' exited with code {code}")]
    CopyFailed { name: String, code: i32 },
}

/// Errors from the commit-flow handoff to git.
#[derive(Error, Debug)]
pub enum CommitFlowError {
    #[error("Failed to write commit template: {0}")]
    TemplateWrite(#[source] std::io::Error),

    #[error("Failed to launch git: {0}")]
    GitLaunch(#[source] std::io::Error),

    #[error("git commit exited with {}", code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommitFailed { code: Option<i32> },
}

/// Errors that abort output routing.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Could not generate a suggestion: {0}")]
    Generation(#[source] ChainExhausted),

    #[error("Commit flow failed: {0}")]
    Commit(#[source] CommitFlowError),

    #[error("Failed to write output: {0}")]
    Io(#[source] std::io::Error),
}
