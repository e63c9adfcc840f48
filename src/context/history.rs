//! Recent commit subjects for prompt context.

use git2::{ErrorCode, Repository, Sort};

use crate::error::ContextError;

/// How many recent subjects the prompt carries.
const HISTORY_LIMIT: usize = 10;

/// Subjects of up to the last [`HISTORY_LIMIT`] commits, newest first.
///
/// An unborn HEAD yields an empty history rather than an error, so the very
/// first commit of a repository still gets a suggestion.
pub fn recent_subjects(repo: &Repository) -> Result<Vec<String>, ContextError> {
    let mut revwalk = repo.revwalk().map_err(ContextError::HistoryFailed)?;
    revwalk
        .set_sorting(Sort::TIME)
        .map_err(ContextError::HistoryFailed)?;

    match revwalk.push_head() {
        Ok(()) => {}
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(ContextError::HistoryFailed(e)),
    }

    let mut subjects = Vec::new();
    for oid in revwalk.take(HISTORY_LIMIT) {
        let oid = oid.map_err(ContextError::HistoryFailed)?;
        let commit = repo.find_commit(oid).map_err(ContextError::HistoryFailed)?;
        subjects.push(commit.summary().unwrap_or("(no subject)").to_string());
    }

    Ok(subjects)
}
