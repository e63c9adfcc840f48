//! Staged-change collection using git2.

use std::fmt;

use git2::{Delta, DiffFormat, DiffOptions, ErrorCode, Repository, Tree};

use crate::error::ContextError;

/// Status of a staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "Added"),
            FileStatus::Modified => write!(f, "Modified"),
            FileStatus::Deleted => write!(f, "Deleted"),
            FileStatus::Renamed => write!(f, "Renamed"),
        }
    }
}

/// A file with staged changes.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: String,
    pub status: FileStatus,
}

/// Everything staged in the index relative to HEAD.
#[derive(Debug, Clone)]
pub struct StagedChanges {
    pub diff_text: String,
    pub files: Vec<StagedFile>,
    pub additions: usize,
    pub deletions: usize,
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// so the first commit diffs against an empty tree.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, ContextError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(ContextError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(ContextError::DiffFailed)?;
    Ok(Some(tree))
}

/// Collect the staged diff (HEAD tree vs index).
///
/// Unstaged and untracked changes are deliberately excluded: the suggestion
/// describes what the commit will actually contain. An empty index diff is
/// the benign `NoStagedChanges` early exit.
pub fn collect_staged(repo: &Repository) -> Result<StagedChanges, ContextError> {
    let head_tree = resolve_head_tree(repo)?;

    let mut opts = DiffOptions::new();
    let mut diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
        .map_err(ContextError::DiffFailed)?;
    diff.find_similar(None).map_err(ContextError::DiffFailed)?;

    build_changes(&diff)
}

fn build_changes(diff: &git2::Diff<'_>) -> Result<StagedChanges, ContextError> {
    let mut files = Vec::new();
    for delta in diff.deltas() {
        let status = match delta.status() {
            Delta::Added | Delta::Copied => FileStatus::Added,
            Delta::Deleted => FileStatus::Deleted,
            Delta::Renamed => FileStatus::Renamed,
            _ => FileStatus::Modified,
        };
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        files.push(StagedFile { path, status });
    }

    if files.is_empty() {
        return Err(ContextError::NoStagedChanges);
    }

    let stats = diff.stats().map_err(ContextError::DiffFailed)?;

    let mut diff_text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => diff_text.push(line.origin()),
            _ => {}
        }
        diff_text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(ContextError::DiffFailed)?;

    Ok(StagedChanges {
        diff_text,
        files,
        additions: stats.insertions(),
        deletions: stats.deletions(),
    })
}

/// Cut `text` at `max_len` bytes (on a char boundary) with a marker appended.
///
/// Returns the text and whether it was truncated.
pub fn truncate_diff(text: &str, max_len: usize) -> (String, bool) {
    if text.len() <= max_len {
        return (text.to_string(), false);
    }

    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    (format!("{}\n[diff truncated]", &text[..cut]), true)
}
