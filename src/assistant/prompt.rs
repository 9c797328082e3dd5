//! Prompt construction for AI-generated commit messages.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Default cap on the diff excerpt embedded in the prompt.
pub const DEFAULT_DIFF_EXCERPT_LENGTH: usize = 3_000;

/// Maximum number of file paths listed in the prompt.
const MAX_LISTED_FILES: usize = 50;

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("Invalid regex"));

// type(scope)!: at the start of a line, for known conventional types only
static CONVENTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:feat|fix|chore|docs|style|refactor|test|perf|build|ci|revert)(?:\([^)]*\))?!?\s*:\s*",
    )
    .expect("Invalid regex")
});

/// Build the prompt asking the model for a one-line commit summary.
///
/// The file list is capped at 50 entries and the diff at `max_diff_len`
/// characters, so the prompt stays bounded however large the change is.
pub fn build_commit_prompt(diff: &str, changed_paths: &[String], max_diff_len: usize) -> String {
    let mut files_section: String = changed_paths
        .iter()
        .take(MAX_LISTED_FILES)
        .map(|path| format!("- {}", remove_control_chars(path)))
        .collect::<Vec<_>>()
        .join("\n");

    if changed_paths.len() > MAX_LISTED_FILES {
        files_section.push_str(&format!(
            "\n- ... and {} more",
            changed_paths.len() - MAX_LISTED_FILES
        ));
    }

    let (excerpt, truncated) = excerpt_diff(diff, max_diff_len);
    let truncation_note = if truncated {
        "\n\nNote: The diff was truncated due to size. Focus on the visible changes."
    } else {
        ""
    };

    format!(
        r#"You are writing the description part of a Git commit message.

## Changed Files ({file_count})
{files_section}

## Diff
```
{excerpt}
```{truncation_note}

## Rules
- One line, at most 72 characters
- Imperative mood ("add", "fix", "remove"), lowercase, no period at the end
- Do NOT include a type prefix such as "feat:" or "fix:"; it is added separately
- Describe what changed for a reader of the history, not file names alone

Respond with ONLY the description line, no quotes, no explanation."#,
        file_count = changed_paths.len(),
    )
}

/// Sanitize and cap the diff for inclusion in the prompt.
///
/// Returns the excerpt and whether it was cut.
fn excerpt_diff(diff: &str, max_len: usize) -> (String, bool) {
    let mut result = ANSI_ESCAPE.replace_all(diff, "").into_owned();
    result = remove_control_chars(&result);

    match result.char_indices().nth(max_len) {
        Some((end, _)) => {
            result.truncate(end);
            (result, true)
        }
        None => (result, false),
    }
}

/// Remove control characters except newlines and tabs.
fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Reduce a raw model response to a single commit description line.
///
/// Takes the first non-empty line, strips wrapping quotes or backticks, and
/// drops a leading `type(scope):` prefix the model may have added anyway.
/// Returns an empty string when nothing usable remains.
pub fn clean_generated_message(raw: &str) -> String {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("```"))
        .unwrap_or("");

    let unquoted = line.trim_matches(|c| c == '"' || c == '\'' || c == '`').trim();

    CONVENTIONAL_PREFIX
        .replace(unquoted, "")
        .trim()
        .to_string()
}
