//! penna - CLI entry point.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use git2::Repository;
use tracing_subscriber::EnvFilter;

use penna::backend::{CapabilityRegistry, Engine, resolve_descriptors};
use penna::clipboard::SystemClipboard;
use penna::config::Config;
use penna::context::build_prompt;
use penna::error::ContextError;
use penna::router::{Router, RunMode};
use penna::vcs::GitCommitFlow;

/// Draft a commit message for the staged changes.
#[derive(Parser, Debug)]
#[command(name = "penna")]
#[command(about = "Draft a commit message for the staged changes")]
#[command(version)]
struct Cli {
    /// Print or copy the assembled prompt instead of querying a model
    #[arg(long, overrides_with = "prompt")]
    prompt: bool,

    /// Route only the generated message (skip prompt copying)
    #[arg(long, overrides_with = "result")]
    result: bool,

    /// Truncate the diff so the prompt fits interactive paste targets
    #[arg(long, overrides_with = "short")]
    short: bool,

    /// Path to an alternate configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Step 1: Load configuration (fatal before any backend is attempted)
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Step 2: Open git repository
    let repo = Repository::open(".")
        .context("Not a git repository. Run penna from within a git repository.")?;

    // Step 3: Assemble the prompt from staged changes and recent history
    let prompt = match build_prompt(&repo, cli.short) {
        Ok(prompt) => prompt,
        Err(ContextError::NoStagedChanges) => {
            println!("No staged changes. Stage files with 'git add' first.");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to collect staged changes"),
    };

    // Step 4: Resolve configured commands against the capability registry
    let registry = CapabilityRegistry::with_builtins();
    let models = resolve_descriptors(&config.model_preferences, &registry);
    let filters = resolve_descriptors(&config.result_filters, &registry);
    let engine = Engine::new(models, filters, &config);

    // Step 5: Route the prompt and result
    let mode = RunMode {
        prompt_only: cli.prompt,
        result_only: cli.result,
    };
    let router = Router::new(&config, mode, std::io::stdout().is_terminal());

    let mut stdout = std::io::stdout().lock();
    router
        .route(&prompt, &mut stdout, &engine, &SystemClipboard, &GitCommitFlow)
        .await
        .context("Could not produce a commit message")?;

    Ok(())
}
