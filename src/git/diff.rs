//! Staged diff collection using git2.

use git2::{DiffFormat, ErrorCode, Repository, Tree};
use tracing::warn;

use crate::error::GitError;

/// Maximum characters collected from the staged diff.
///
/// The prompt takes a much smaller excerpt; this bound only keeps huge
/// changes from being rendered in full.
pub const MAX_DIFF_LENGTH: usize = 30_000;

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// `Ok(Some(tree))` for repos with a valid HEAD, or `Err(GitError::Diff)`
/// for real errors (corrupt HEAD, permission issues, missing objects).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::Diff(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::Diff)?;
    Ok(Some(tree))
}

/// Render the index-vs-HEAD diff as unified patch text.
///
/// git2 never emits color codes, so the output matches
/// `git diff --cached --no-color`. Stops at [`MAX_DIFF_LENGTH`] characters.
pub fn collect_staged_diff(repo: &Repository) -> Result<String, GitError> {
    let head_tree = resolve_head_tree(repo)?;

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::Diff)?;

    let mut text = String::new();
    let mut truncated = false;

    if let Err(e) = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if truncated {
            return true;
        }

        let content = std::str::from_utf8(line.content()).unwrap_or("");

        if text.len() + content.len() + 1 > MAX_DIFF_LENGTH {
            truncated = true;
            return true;
        }

        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(content);

        true
    }) {
        warn!("Failed to collect diff text: {e}");
    }

    Ok(text)
}
