//! autocommit - sync, stage, commit with a conventional-commit message, and push.
//!
//! # Overview
//!
//! autocommit fetches and pulls, stages every change, derives a commit type
//! from the changed paths (or takes one from the command line), and writes
//! the message from explicit text, a local inference service, or the list of
//! changed files. It then commits, pushes, and pulls again.

pub mod assistant;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod workflow;

// Re-export commonly used types
pub use assistant::{Assistant, DisabledAssistant, OllamaAssistant};
pub use commit::{CommitKind, CommitMessage, CommitRequest, CommitType, ImpactCategory, ImpactRules};
pub use config::{AssistantConfig, Config};
pub use error::{AssistantError, GitError, WorkflowError};
pub use git::{ChangedFile, FileStatus, GitCli, VcsClient};
pub use workflow::{Workflow, WorkflowOutcome};
