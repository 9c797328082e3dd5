//! Gateway to a local Ollama-compatible inference service.
//!
//! Availability requires the service binary on the search path and the HTTP
//! endpoint answering a probe. When the endpoint is down the gateway starts
//! the service in the background and waits once for it to come up; it does
//! not re-probe, so the following generation request may still fail.

use std::ffi::OsString;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assistant::Assistant;
use crate::assistant::prompt::{build_commit_prompt, clean_generated_message};
use crate::assistant::service::{executable_on_path, start_detached};
use crate::config::AssistantConfig;
use crate::error::AssistantError;

/// Maximum characters of an error body kept in [`AssistantError::BadStatus`].
const MAX_ERROR_BODY_LENGTH: usize = 200;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaAssistant {
    client: reqwest::Client,
    config: AssistantConfig,
    search_path: Option<OsString>,
}

impl OllamaAssistant {
    /// Create a gateway that searches the process `PATH` for the service binary.
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Replace the search path used to locate the service binary.
    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    /// Check that the service answers on its root endpoint.
    ///
    /// Any HTTP response counts; only a transport failure means it is down.
    async fn probe(&self) -> bool {
        match self.client.get(format!("{}/", self.config.base_url)).send().await {
            Ok(response) => {
                debug!("Inference service answered probe with {}", response.status());
                true
            }
            Err(e) => {
                debug!("Inference service probe failed: {}", e);
                false
            }
        }
    }

    /// Single generation request; no retries.
    async fn request(&self, prompt: &str) -> Result<String, AssistantError> {
        let url = format!("{}/api/generate", self.config.base_url);
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(AssistantError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AssistantError::BadStatus {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_LENGTH).collect(),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

        Ok(parsed.response)
    }
}

#[async_trait]
impl Assistant for OllamaAssistant {
    async fn is_available(&self) -> bool {
        let Some(executable) =
            executable_on_path(&self.config.executable, self.search_path.as_deref())
        else {
            debug!("{} is not installed, skipping AI message", self.config.executable);
            return false;
        };

        if self.probe().await {
            return true;
        }

        println!("  Starting {} service...", self.config.executable);
        if let Err(e) = start_detached(&executable) {
            warn!("{}", e);
            return false;
        }

        tokio::time::sleep(self.config.startup_wait).await;
        true
    }

    async fn generate(
        &self,
        diff: &str,
        changed_paths: &[String],
    ) -> Result<String, AssistantError> {
        let prompt = build_commit_prompt(diff, changed_paths, self.config.diff_limit);
        debug!("Commit prompt length: {} chars", prompt.len());

        let raw = self.request(&prompt).await?;
        let message = clean_generated_message(&raw);

        if message.is_empty() {
            return Err(AssistantError::InvalidResponse(format!(
                "empty message in response: {:?}",
                raw.chars().take(MAX_ERROR_BODY_LENGTH).collect::<String>()
            )));
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_available_without_search_path() {
        let assistant = OllamaAssistant::new(AssistantConfig::default()).with_search_path(None);
        assert!(!assistant.is_available().await);
    }

    #[tokio::test]
    async fn test_not_available_when_binary_missing() {
        let dir = tempfile::tempdir().unwrap();
        let assistant = OllamaAssistant::new(AssistantConfig::default())
            .with_search_path(Some(dir.path().as_os_str().to_owned()));
        assert!(!assistant.is_available().await);
    }

    #[test]
    fn test_generate_request_serialization() {
        let body = GenerateRequest {
            model: "llama3.2",
            prompt: "hello",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "llama3.2", "prompt": "hello", "stream": false})
        );
    }
}
