//! Deferred issue records and the stderr reporting surface.

use std::fmt;

use super::spec::CommandSpec;

/// A problem with one configured command, kept for possible later reporting.
#[derive(Debug, Clone)]
pub struct Issue {
    pub spec: CommandSpec,
    pub detail: String,
}

impl Issue {
    pub fn unavailable(spec: &CommandSpec) -> Self {
        Self {
            spec: spec.clone(),
            detail: format!(
                "'{}' is not available (no such executable or capability)",
                spec.name()
            ),
        }
    }

    pub fn unconfigured(spec: &CommandSpec) -> Self {
        Self {
            spec: spec.clone(),
            detail: format!("'{}' is not configured", spec.name()),
        }
    }

    pub fn process_failure(spec: &CommandSpec, code: i32, stderr: &str) -> Self {
        let trimmed = stderr.trim();
        let detail = if trimmed.is_empty() {
            format!("exited with code {code}")
        } else {
            format!("exited with code {code}: {trimmed}")
        };
        Self {
            spec: spec.clone(),
            detail,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.spec, self.detail)
    }
}

/// Print one issue immediately.
pub fn report_issue(issue: &Issue) {
    eprintln!("Warning: {issue}");
}

/// Print queued issues as a single grouped block. No-op when empty.
pub fn flush_issues(issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }
    eprintln!("The following commands were skipped:");
    for issue in issues {
        eprintln!("  {issue}");
    }
}
