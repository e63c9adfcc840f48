//! Commit flow handoff to the system git binary.

use std::io::Write as _;
use std::process::Command;

use tempfile::NamedTempFile;

use crate::error::CommitFlowError;
use crate::router::CommitFlow;

/// Opens `git commit` pre-filled with the suggestion as a template.
///
/// Shells out to the system git so the user's editor, hooks, and config all
/// apply unchanged.
pub struct GitCommitFlow;

impl CommitFlow for GitCommitFlow {
    fn open(&self, template: &str) -> Result<(), CommitFlowError> {
        let mut file = NamedTempFile::new().map_err(CommitFlowError::TemplateWrite)?;
        file.write_all(template.as_bytes())
            .map_err(CommitFlowError::TemplateWrite)?;
        if !template.ends_with('\n') {
            file.write_all(b"\n").map_err(CommitFlowError::TemplateWrite)?;
        }
        file.flush().map_err(CommitFlowError::TemplateWrite)?;

        // Inherited stdio so the configured editor can take the terminal.
        // The temp file must outlive the subprocess, hence `file` stays in
        // scope until after `status()` returns.
        let status = Command::new("git")
            .args(["commit", "--edit", "--template"])
            .arg(file.path())
            .status()
            .map_err(CommitFlowError::GitLaunch)?;

        if !status.success() {
            return Err(CommitFlowError::CommitFailed {
                code: status.code(),
            });
        }

        Ok(())
    }
}
