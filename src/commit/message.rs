//! Commit message resolution and formatting.

use tracing::{debug, warn};

use crate::assistant::Assistant;
use crate::commit::kind::CommitKind;
use crate::error::GitError;

/// The final commit message: a kind label plus description text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub kind: CommitKind,
    pub text: String,
}

impl CommitMessage {
    pub fn new(kind: CommitKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Format the message for git as `<type>: <text>`.
    pub fn format(&self) -> String {
        format!("{}: {}", self.kind.label(), self.text)
    }
}

/// Choose the commit description text.
///
/// Precedence:
/// 1. `explicit`, if it is non-empty after trimming
/// 2. the assistant's summary of the staged diff, if it is available and succeeds
/// 3. the changed paths joined with `", "`
///
/// `load_diff` is only called when the assistant tier is attempted. Assistant
/// and diff failures are logged and fall through; this function never fails.
pub async fn resolve_message<A, D>(
    explicit: Option<&str>,
    changed_paths: &[String],
    assistant: &A,
    load_diff: D,
) -> String
where
    A: Assistant + ?Sized,
    D: FnOnce() -> Result<String, GitError>,
{
    if let Some(text) = explicit.filter(|t| !t.trim().is_empty()) {
        return text.to_string();
    }

    if assistant.is_available().await {
        match generate_with_diff(changed_paths, assistant, load_diff).await {
            Some(text) => return text,
            None => println!("  AI message unavailable, using file list"),
        }
    }

    fallback_message(changed_paths)
}

async fn generate_with_diff<A, D>(
    changed_paths: &[String],
    assistant: &A,
    load_diff: D,
) -> Option<String>
where
    A: Assistant + ?Sized,
    D: FnOnce() -> Result<String, GitError>,
{
    let diff = match load_diff() {
        Ok(diff) => diff,
        Err(e) => {
            warn!("Could not load staged diff for AI message: {}", e);
            return None;
        }
    };

    println!("  Generating commit message with AI...");

    match assistant.generate(&diff, changed_paths).await {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                debug!("Assistant returned an empty message");
                None
            } else {
                Some(text.to_string())
            }
        }
        Err(e) => {
            warn!("AI message generation failed: {}", e);
            None
        }
    }
}

/// Deterministic description listing the changed files.
pub fn fallback_message(changed_paths: &[String]) -> String {
    changed_paths.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::MockAssistant;
    use crate::commit::kind::CommitType;
    use crate::error::AssistantError;

    fn paths(input: &[&str]) -> Vec<String> {
        input.iter().map(|p| p.to_string()).collect()
    }

    fn no_diff() -> Result<String, GitError> {
        panic!("diff must not be loaded")
    }

    #[test]
    fn test_format_conventional() {
        let message = CommitMessage::new(CommitKind::Conventional(CommitType::Docs), "update readme");
        assert_eq!(message.format(), "docs: update readme");
    }

    #[test]
    fn test_format_breaking() {
        let message = CommitMessage::new(CommitKind::Breaking, "routes/user.js");
        assert_eq!(message.format(), "feat!: routes/user.js");
    }

    #[tokio::test]
    async fn test_explicit_message_wins() {
        let mut mock = MockAssistant::new();
        mock.expect_is_available().times(0);
        mock.expect_generate().times(0);

        let text = resolve_message(Some("hello"), &paths(&["a.js"]), &mock, no_diff).await;
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_blank_explicit_message_falls_through() {
        let mut mock = MockAssistant::new();
        mock.expect_is_available().times(1).returning(|| false);

        let text = resolve_message(Some("   "), &paths(&["a.js"]), &mock, no_diff).await;
        assert_eq!(text, "a.js");
    }

    #[tokio::test]
    async fn test_unavailable_assistant_uses_file_list() {
        let mut mock = MockAssistant::new();
        mock.expect_is_available().times(1).returning(|| false);
        mock.expect_generate().times(0);

        let text = resolve_message(None, &paths(&["a.js", "b.js"]), &mock, no_diff).await;
        assert_eq!(text, "a.js, b.js");
    }

    #[tokio::test]
    async fn test_available_assistant_generates_trimmed_text() {
        let mut mock = MockAssistant::new();
        mock.expect_is_available().times(1).returning(|| true);
        mock.expect_generate()
            .withf(|diff, changed| diff == "+line\n" && changed.len() == 1 && changed[0] == "a.js")
            .times(1)
            .returning(|_, _| Ok("  add greeting  \n".to_string()));

        let text = resolve_message(None, &paths(&["a.js"]), &mock, || {
            Ok("+line\n".to_string())
        })
        .await;
        assert_eq!(text, "add greeting");
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back() {
        let mut mock = MockAssistant::new();
        mock.expect_is_available().times(1).returning(|| true);
        mock.expect_generate().times(1).returning(|_, _| {
            Err(AssistantError::InvalidResponse("missing field `response`".to_string()))
        });

        let text = resolve_message(None, &paths(&["a.js", "b.js"]), &mock, || {
            Ok(String::new())
        })
        .await;
        assert_eq!(text, "a.js, b.js");
    }

    #[tokio::test]
    async fn test_empty_generation_falls_back() {
        let mut mock = MockAssistant::new();
        mock.expect_is_available().times(1).returning(|| true);
        mock.expect_generate()
            .times(1)
            .returning(|_, _| Ok("   ".to_string()));

        let text = resolve_message(None, &paths(&["a.js"]), &mock, || Ok(String::new())).await;
        assert_eq!(text, "a.js");
    }

    #[tokio::test]
    async fn test_diff_failure_falls_back_without_generating() {
        let mut mock = MockAssistant::new();
        mock.expect_is_available().times(1).returning(|| true);
        mock.expect_generate().times(0);

        let text = resolve_message(None, &paths(&["a.js"]), &mock, || {
            Err(GitError::CommandFailed {
                operation: "diff".to_string(),
                stderr: "bad index".to_string(),
            })
        })
        .await;
        assert_eq!(text, "a.js");
    }
}
