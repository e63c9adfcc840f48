//! Ordered fallback across configured model commands.

use thiserror::Error;

use super::invoke::{BackendRunner, InvokeOutcome};
use super::issue::{Issue, flush_issues, report_issue};
use super::spec::BackendDescriptor;

/// Every configured model command failed.
#[derive(Error, Debug)]
#[error("every configured model command failed")]
pub struct ChainExhausted {
    /// Issues queued under deferred reporting, already flushed to stderr.
    pub deferred: Vec<Issue>,
}

/// Try each descriptor in configured order and return the first success.
///
/// Order encodes user preference (earlier entries are assumed cheaper or
/// better), so the chain never reorders or parallelizes. Process failures are
/// reported immediately; unavailable/unconfigured commands are reported
/// immediately only when `report_unavailable` is set and queued otherwise.
/// Queued issues are discarded on success and flushed as one grouped block on
/// exhaustion.
pub async fn run_chain<R: BackendRunner>(
    descriptors: &[BackendDescriptor],
    prompt: &str,
    report_unavailable: bool,
    runner: &R,
) -> Result<String, ChainExhausted> {
    let mut deferred: Vec<Issue> = Vec::new();

    for descriptor in descriptors {
        match runner.invoke(descriptor, prompt).await {
            InvokeOutcome::Success(text) => return Ok(text),
            InvokeOutcome::Failed { code, stderr } => {
                // A command that was expected to work but did not; always
                // worth reporting on the spot.
                report_issue(&Issue::process_failure(&descriptor.spec, code, &stderr));
            }
            InvokeOutcome::Unavailable => {
                let issue = Issue::unavailable(&descriptor.spec);
                if report_unavailable {
                    report_issue(&issue);
                } else {
                    deferred.push(issue);
                }
            }
            InvokeOutcome::Unconfigured => {
                let issue = Issue::unconfigured(&descriptor.spec);
                if report_unavailable {
                    report_issue(&issue);
                } else {
                    deferred.push(issue);
                }
            }
        }
    }

    flush_issues(&deferred);
    Err(ChainExhausted { deferred })
}
