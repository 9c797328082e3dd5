//! Optional AI assistant that summarizes staged changes into a commit message.

pub mod ollama;
pub mod prompt;
pub mod service;

use async_trait::async_trait;

use crate::error::AssistantError;

pub use ollama::OllamaAssistant;
pub use prompt::{build_commit_prompt, clean_generated_message};
pub use service::executable_on_path;

/// A text generator for commit messages.
///
/// This abstraction allows substituting the inference service in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Whether a generation request is worth attempting.
    async fn is_available(&self) -> bool;

    /// Summarize the staged diff and changed paths as a commit message.
    async fn generate(&self, diff: &str, changed_paths: &[String])
    -> Result<String, AssistantError>;
}

/// Assistant used when AI generation is turned off.
pub struct DisabledAssistant;

#[async_trait]
impl Assistant for DisabledAssistant {
    async fn is_available(&self) -> bool {
        false
    }

    async fn generate(
        &self,
        _diff: &str,
        _changed_paths: &[String],
    ) -> Result<String, AssistantError> {
        Err(AssistantError::Disabled)
    }
}
