//! Error types for autocommit modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {operation}: {source}")]
    Spawn {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to read working tree status: {0}")]
    Status(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    Diff(#[source] git2::Error),
}

/// Errors from the local inference service.
///
/// `Disabled` and `SpawnFailed` mean the assistant is unavailable; the
/// remaining variants are response errors. Both kinds are contained by the
/// message resolver and never abort the workflow.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("AI assistant is disabled")]
    Disabled,

    #[error("Failed to start inference service: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Inference request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("Inference service returned HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Inference service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Fatal errors from the commit workflow.
///
/// Each variant names the step that failed; nothing after that step runs.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Sync with remote failed: {0}")]
    Sync(#[source] GitError),

    #[error("Could not read changed files: {0}")]
    Status(#[source] GitError),

    #[error("Failed to stage changes: {0}")]
    Stage(#[source] GitError),

    #[error("Failed to create commit (changes remain staged): {0}")]
    Commit(#[source] GitError),

    #[error("Failed to push commit: {0}")]
    Push(#[source] GitError),
}

impl WorkflowError {
    /// Process exit code for this failure class.
    ///
    /// - `2`: sync failures (fetch, pull, push)
    /// - `3`: status or staging failures
    /// - `4`: commit failures
    pub fn exit_code(&self) -> u8 {
        match self {
            WorkflowError::Sync(_) | WorkflowError::Push(_) => 2,
            WorkflowError::Status(_) | WorkflowError::Stage(_) => 3,
            WorkflowError::Commit(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_failure(operation: &str) -> GitError {
        GitError::CommandFailed {
            operation: operation.to_string(),
            stderr: "fatal: boom".to_string(),
        }
    }

    #[test]
    fn test_exit_codes_per_failure_class() {
        assert_eq!(WorkflowError::Sync(git_failure("fetch")).exit_code(), 2);
        assert_eq!(WorkflowError::Push(git_failure("push")).exit_code(), 2);
        assert_eq!(WorkflowError::Status(git_failure("status")).exit_code(), 3);
        assert_eq!(WorkflowError::Stage(git_failure("add")).exit_code(), 3);
        assert_eq!(WorkflowError::Commit(git_failure("commit")).exit_code(), 4);
    }

    #[test]
    fn test_workflow_error_message_includes_git_stderr() {
        let err = WorkflowError::Commit(git_failure("commit"));
        let message = err.to_string();
        assert!(message.contains("remain staged"));
        assert!(message.contains("git commit failed: fatal: boom"));
    }
}
