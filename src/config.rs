//! Configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::assistant::prompt::DEFAULT_DIFF_EXCERPT_LENGTH;
use crate::commit::ImpactRules;

/// Default base URL of the local inference service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model used for generation.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Default inference service executable.
pub const DEFAULT_EXECUTABLE: &str = "ollama";

/// Default wait after starting the inference service.
pub const DEFAULT_STARTUP_WAIT_SECS: u64 = 3;

const REMOTE_ENV_VAR: &str = "AUTOCOMMIT_REMOTE";
const BRANCH_ENV_VAR: &str = "AUTOCOMMIT_BRANCH";
const BASE_URL_ENV_VAR: &str = "AUTOCOMMIT_OLLAMA_URL";
const MODEL_ENV_VAR: &str = "AUTOCOMMIT_MODEL";
const EXECUTABLE_ENV_VAR: &str = "AUTOCOMMIT_OLLAMA_BIN";
const STARTUP_WAIT_ENV_VAR: &str = "AUTOCOMMIT_STARTUP_WAIT";
const DIFF_LIMIT_ENV_VAR: &str = "AUTOCOMMIT_DIFF_LIMIT";
const MAJOR_PREFIXES_ENV_VAR: &str = "AUTOCOMMIT_MAJOR_PREFIXES";
const ENTRY_FILES_ENV_VAR: &str = "AUTOCOMMIT_ENTRY_FILES";
const MINOR_FILES_ENV_VAR: &str = "AUTOCOMMIT_MINOR_FILES";

/// Settings for the inference service gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub base_url: String,
    pub model: String,
    pub executable: String,
    pub startup_wait: Duration,
    pub diff_limit: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            executable: DEFAULT_EXECUTABLE.to_string(),
            startup_wait: Duration::from_secs(DEFAULT_STARTUP_WAIT_SECS),
            diff_limit: DEFAULT_DIFF_EXCERPT_LENGTH,
        }
    }
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: string_var(BASE_URL_ENV_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: string_var(MODEL_ENV_VAR).unwrap_or(defaults.model),
            executable: string_var(EXECUTABLE_ENV_VAR).unwrap_or(defaults.executable),
            startup_wait: Duration::from_secs(number_var(
                STARTUP_WAIT_ENV_VAR,
                DEFAULT_STARTUP_WAIT_SECS,
            )),
            diff_limit: number_var(DIFF_LIMIT_ENV_VAR, DEFAULT_DIFF_EXCERPT_LENGTH as u64) as usize,
        }
    }
}

/// Full runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Remote to sync with; `None` uses the upstream of the current branch.
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub assistant: AssistantConfig,
    pub rules: ImpactRules,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = ImpactRules::default();
        Self {
            remote: string_var(REMOTE_ENV_VAR),
            branch: string_var(BRANCH_ENV_VAR),
            assistant: AssistantConfig::from_env(),
            rules: ImpactRules {
                major_prefixes: list_var(MAJOR_PREFIXES_ENV_VAR).unwrap_or(defaults.major_prefixes),
                entry_files: list_var(ENTRY_FILES_ENV_VAR).unwrap_or(defaults.entry_files),
                minor_files: list_var(MINOR_FILES_ENV_VAR).unwrap_or(defaults.minor_files),
            },
        }
    }
}

/// Read a non-empty, trimmed string variable.
fn string_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a comma-separated list variable, skipping empty items.
fn list_var(name: &str) -> Option<Vec<String>> {
    let items: Vec<String> = string_var(name)?
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();

    (!items.is_empty()).then_some(items)
}

/// Read a numeric variable.
///
/// Logs a warning if the variable is set but contains an invalid value
/// (non-numeric or negative) and returns the default.
fn number_var(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(v) if !v.is_empty() => match v.trim().parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                warn!("Invalid {} value '{}', using default {}", name, v, default);
                default
            }
        },
        _ => default,
    }
}
