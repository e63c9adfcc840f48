//! Backend dispatch: command specs, invocation, fallback, and filtering.

pub mod chain;
pub mod engine;
pub mod filter;
pub mod invoke;
pub mod issue;
pub mod spec;

pub use chain::{ChainExhausted, run_chain};
pub use engine::Engine;
pub use filter::run_filters;
pub use invoke::{BackendRunner, InvokeOutcome, ProcessRunner};
pub use issue::Issue;
pub use spec::{
    BackendDescriptor, Capability, CapabilityRegistry, CommandSpec, resolve_descriptors,
};
