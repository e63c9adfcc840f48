//! penna - A CLI tool that drafts commit messages for staged changes.
//!
//! # Overview
//!
//! penna assembles a prompt from the staged diff and recent commit history,
//! asks the first working command from an ordered preference list to draft a
//! commit message, post-processes the draft through optional filter commands,
//! and routes the outcome to the terminal, the clipboard, or a git commit.

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod context;
pub mod error;
pub mod router;
pub mod vcs;

// Re-export commonly used types
pub use backend::{
    BackendDescriptor, BackendRunner, CapabilityRegistry, ChainExhausted, CommandSpec, Engine,
    InvokeOutcome, resolve_descriptors,
};
pub use config::Config;
pub use error::{ClipboardError, CommitFlowError, ConfigError, ContextError, RouteError};
pub use router::{RunMode, Router};
