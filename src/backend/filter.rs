//! Post-processing pipeline over the generated suggestion.

use super::invoke::{BackendRunner, InvokeOutcome};
use super::issue::{Issue, flush_issues, report_issue};
use super::spec::BackendDescriptor;

/// Thread `text` through every filter in order.
///
/// Unlike the fallback chain there is no short-circuit: every filter runs,
/// each one's output becoming the next one's input. A filter that is
/// unavailable, unconfigured, or fails is skipped and its input passes
/// through unchanged. The pipeline as a whole cannot fail; worst case it
/// returns the input text untouched. Deferred issues are flushed at the end
/// unconditionally (there is no success to suppress them for).
pub async fn run_filters<R: BackendRunner>(
    descriptors: &[BackendDescriptor],
    text: String,
    report_unavailable: bool,
    runner: &R,
) -> String {
    let (text, deferred) = apply(descriptors, text, report_unavailable, runner).await;
    flush_issues(&deferred);
    text
}

async fn apply<R: BackendRunner>(
    descriptors: &[BackendDescriptor],
    text: String,
    report_unavailable: bool,
    runner: &R,
) -> (String, Vec<Issue>) {
    let mut current = text;
    let mut deferred: Vec<Issue> = Vec::new();

    for descriptor in descriptors {
        match runner.invoke(descriptor, &current).await {
            InvokeOutcome::Success(next) => current = next,
            InvokeOutcome::Failed { code, stderr } => {
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

    (current, deferred)
}
