//! Command specifications and the named-capability registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Readiness predicate shared by availability and configuration checks.
pub type ReadinessCheck = Arc<dyn Fn() -> bool + Send + Sync>;

/// Handler for a capability that runs in-process: payload in, text out.
pub type InProcessHandler = Arc<dyn Fn(&str) -> Result<String, String> + Send + Sync>;

/// One configured command: an executable (or built-in capability) name
/// followed by literal arguments. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    tokens: Vec<String>,
}

impl CommandSpec {
    /// Build a spec from raw tokens.
    ///
    /// Callers guarantee non-emptiness; config validation rejects empty
    /// entries before any spec is constructed.
    pub fn new(tokens: Vec<String>) -> Self {
        debug_assert!(!tokens.is_empty(), "CommandSpec requires at least a name");
        Self { tokens }
    }

    /// The executable or capability name (first token).
    pub fn name(&self) -> &str {
        &self.tokens[0]
    }

    /// Literal arguments (remaining tokens).
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// Optional hooks a backend name may carry.
///
/// Absent hooks fall back to the defaults: availability means the executable
/// resolves on PATH (or an in-process handler exists), and configuration is
/// always ready.
#[derive(Clone, Default)]
pub struct Capability {
    /// Overrides the default executable-lookup availability check.
    pub is_available: Option<ReadinessCheck>,
    /// Additional readiness check (credentials present etc.).
    pub is_configured: Option<ReadinessCheck>,
    /// Handler for capabilities that run in-process instead of spawning.
    pub run: Option<InProcessHandler>,
}

/// Registry mapping backend names to capability hooks.
#[derive(Default)]
pub struct CapabilityRegistry {
    entries: HashMap<String, Capability>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the stock credential checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(
            "claude",
            Capability {
                is_configured: Some(Arc::new(|| {
                    std::env::var_os("ANTHROPIC_API_KEY").is_some()
                        || dirs::home_dir().is_some_and(|home| home.join(".claude.json").exists())
                })),
                ..Capability::default()
            },
        );

        registry.register(
            "codex",
            Capability {
                is_configured: Some(Arc::new(|| {
                    std::env::var_os("OPENAI_API_KEY").is_some()
                        || dirs::home_dir()
                            .is_some_and(|home| home.join(".codex/auth.json").exists())
                })),
                ..Capability::default()
            },
        );

        registry
    }

    pub fn register(&mut self, name: impl Into<String>, capability: Capability) {
        self.entries.insert(name.into(), capability);
    }

    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.entries.get(name)
    }
}

/// A resolved command plus the capability hooks bound to its name.
#[derive(Clone)]
pub struct BackendDescriptor {
    pub spec: CommandSpec,
    pub capability: Capability,
}

/// Bind each command to its registry hooks by exact name match.
///
/// Unknown names get the default (empty) capability; resolution cannot fail
/// on validated config.
pub fn resolve_descriptors(
    specs: &[CommandSpec],
    registry: &CapabilityRegistry,
) -> Vec<BackendDescriptor> {
    specs
        .iter()
        .map(|spec| BackendDescriptor {
            capability: registry.get(spec.name()).cloned().unwrap_or_default(),
            spec: spec.clone(),
        })
        .collect()
}
