//! Prompt assembly: message rules + recent history + staged diff.

pub mod diff;
pub mod history;

use git2::Repository;

use crate::error::ContextError;

pub use diff::{FileStatus, StagedChanges, StagedFile, collect_staged, truncate_diff};
pub use history::recent_subjects;

/// Diff cap for the shortened prompt variant.
pub const SHORT_DIFF_LIMIT: usize = 30_000;

const RULES: &str = r#"You are writing a Git commit message for the staged changes below.

Rules:
- Format: `type(scope): description` per Conventional Commits
- Type: one of feat, fix, build, chore, ci, docs, style, refactor, perf, test
- Description: imperative mood, lowercase after the colon, no trailing period
- Keep the subject line at or under 50 characters
- Follow the recent commit subjects' conventions where they are consistent
- Add a body only when the change needs a WHY; wrap it at 72 characters
- Output only the commit message, no commentary and no code fences"#;

/// Build the prompt for the model commands.
///
/// `short` truncates the diff so the prompt stays paste-friendly for
/// interactive chat targets.
pub fn build_prompt(repo: &Repository, short: bool) -> Result<String, ContextError> {
    let changes = collect_staged(repo)?;
    let history = recent_subjects(repo)?;
    Ok(compose(&changes, &history, short))
}

fn compose(changes: &StagedChanges, history: &[String], short: bool) -> String {
    let files_section: String = changes
        .files
        .iter()
        .map(|f| format!("- {} ({})", f.path, f.status))
        .collect::<Vec<_>>()
        .join("\n");

    let history_section = if history.is_empty() {
        "(no commits yet)".to_string()
    } else {
        history
            .iter()
            .map(|subject| format!("- {subject}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let (diff_text, truncated) = if short {
        diff::truncate_diff(&changes.diff_text, SHORT_DIFF_LIMIT)
    } else {
        (changes.diff_text.clone(), false)
    };

    let truncation_note = if truncated {
        "\n\nNote: the diff was truncated to fit. Focus on the visible changes."
    } else {
        ""
    };

    format!(
        r#"{RULES}

## Recent commits
{history_section}

## Staged files ({additions} additions, {deletions} deletions)
{files_section}

## Diff
```
{diff_text}
```{truncation_note}
"#,
        additions = changes.additions,
        deletions = changes.deletions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(diff_text: &str) -> StagedChanges {
        StagedChanges {
            diff_text: diff_text.to_string(),
            files: vec![
                StagedFile {
                    path: "src/lib.rs".to_string(),
                    status: FileStatus::Modified,
                },
                StagedFile {
                    path: "src/new.rs".to_string(),
                    status: FileStatus::Added,
                },
            ],
            additions: 12,
            deletions: 3,
        }
    }

    #[test]
    fn compose_includes_files_history_and_diff() {
        let prompt = compose(
            &changes("+fn new() {}\n"),
            &["feat(core): add engine".to_string()],
            false,
        );

        assert!(prompt.contains("- src/lib.rs (Modified)"));
        assert!(prompt.contains("- src/new.rs (Added)"));
        assert!(prompt.contains("- feat(core): add engine"));
        assert!(prompt.contains("+fn new() {}"));
        assert!(prompt.contains("12 additions, 3 deletions"));
        assert!(!prompt.contains("truncated"));
    }

    #[test]
    fn compose_marks_empty_history() {
        let prompt = compose(&changes("+x\n"), &[], false);
        assert!(prompt.contains("(no commits yet)"));
    }

    #[test]
    fn short_mode_truncates_an_oversized_diff() {
        let big = "+".repeat(SHORT_DIFF_LIMIT + 1000);
        let prompt = compose(&changes(&big), &[], true);

        assert!(prompt.contains("[diff truncated]"));
        assert!(prompt.contains("the diff was truncated"));
    }

    #[test]
    fn short_mode_leaves_small_diffs_alone() {
        let prompt = compose(&changes("+tiny\n"), &[], true);
        assert!(!prompt.contains("truncated"));
    }
}
