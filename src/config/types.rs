//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global and project (.openwiki/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::constants::{completion, fetch, network, selection};
use crate::types::{Result, WikiError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Completion endpoint settings
    pub completion: CompletionConfig,

    /// Repository fetch settings
    pub fetch: FetchConfig,

    /// Content selection thresholds
    pub selection: SelectionConfig,

    /// Per-run workspace placement
    pub workspace: WorkspaceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            completion: CompletionConfig::default(),
            fetch: FetchConfig::default(),
            selection: SelectionConfig::default(),
            workspace: WorkspaceConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `WikiError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        let c = &self.completion;

        if !(0.0..=2.0).contains(&c.temperature) {
            return Err(WikiError::Config(format!(
                "completion temperature must be between 0.0 and 2.0, got {}",
                c.temperature
            )));
        }

        if c.timeout_secs == 0 {
            return Err(WikiError::Config(
                "completion timeout_secs must be greater than 0".to_string(),
            ));
        }

        if c.max_tokens == 0 {
            return Err(WikiError::Config(
                "completion max_tokens must be greater than 0".to_string(),
            ));
        }

        if c.model.trim().is_empty() {
            return Err(WikiError::Config("completion model must be set".to_string()));
        }

        let url = Url::parse(&c.api_base).map_err(|e| {
            WikiError::Config(format!("completion api_base '{}' is invalid: {}", c.api_base, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(WikiError::Config(format!(
                "completion api_base must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.fetch.host.trim().is_empty() || self.fetch.host.contains('/') {
            return Err(WikiError::Config(format!(
                "fetch host '{}' must be a bare host name",
                self.fetch.host
            )));
        }

        self.selection.validate()
    }
}

// =============================================================================
// Completion Configuration
// =============================================================================

/// Completion endpoint configuration
///
/// Note: the API key is never serialized and is redacted in debug output.
/// The client converts it to a SecretString at construction time.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Endpoint base URL (the chat-completions path is appended)
    pub api_base: String,

    /// Model identifier sent with each request
    pub model: String,

    /// Bearer credential
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Sampling temperature (low favors determinism)
    pub temperature: f32,

    /// Output length ceiling
    pub max_tokens: u32,

    /// Transport-level request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_base: completion::DEFAULT_API_BASE.to_string(),
            model: completion::DEFAULT_MODEL.to_string(),
            api_key: None,
            temperature: completion::DEFAULT_TEMPERATURE,
            max_tokens: completion::DEFAULT_MAX_TOKENS,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Fetch Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Version-control executable invoked for the clone
    pub git_program: String,

    /// Code-hosting host in `https://<host>/<owner>/<repo>.git`
    pub host: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            git_program: fetch::DEFAULT_GIT_PROGRAM.to_string(),
            host: fetch::DEFAULT_HOST.to_string(),
        }
    }
}

// =============================================================================
// Selection Configuration
// =============================================================================

/// Content selector thresholds, all measured in characters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Aggregate ceiling checked before each code file is read
    pub max_total_chars: usize,
    /// Code files must be longer than this
    pub min_file_chars: usize,
    /// Code files must be shorter than this
    pub max_file_chars: usize,
    /// Selected code files are truncated to this length
    pub truncate_at_chars: usize,
    /// Identity files must be shorter than this
    pub max_identity_file_chars: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_total_chars: selection::MAX_TOTAL_CHARS,
            min_file_chars: selection::MIN_FILE_CHARS,
            max_file_chars: selection::MAX_FILE_CHARS,
            truncate_at_chars: selection::TRUNCATE_AT_CHARS,
            max_identity_file_chars: selection::MAX_IDENTITY_FILE_CHARS,
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_file_chars >= self.max_file_chars {
            return Err(WikiError::Config(format!(
                "selection min_file_chars ({}) must be below max_file_chars ({})",
                self.min_file_chars, self.max_file_chars
            )));
        }
        if self.truncate_at_chars == 0 || self.truncate_at_chars > self.max_file_chars {
            return Err(WikiError::Config(format!(
                "selection truncate_at_chars ({}) must be in 1..={}",
                self.truncate_at_chars, self.max_file_chars
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Workspace Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Parent directory for run workspaces (defaults to the system temp dir)
    pub root: Option<PathBuf>,
}

impl WorkspaceConfig {
    /// Directory under which per-run snapshot directories are created
    pub fn base_dir(&self) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .join(fetch::WORKSPACE_DIR_NAME)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.completion.model, "gpt-5-codex-mini");
        assert_eq!(config.completion.max_tokens, 8192);
        assert_eq!(config.selection.max_total_chars, 60_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.completion.temperature = 3.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.completion.api_base = "ftp://example.com".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.completion.api_base = "not a url".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.selection.min_file_chars = 40_000;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fetch.host = "github.com/evil".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_redacted_and_not_serialized() {
        let mut config = CompletionConfig::default();
        config.api_key = Some("sk-secret".into());

        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-secret"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[test]
    fn test_workspace_base_dir() {
        let config = WorkspaceConfig {
            root: Some(PathBuf::from("/var/tmp/wiki")),
        };
        assert_eq!(config.base_dir(), PathBuf::from("/var/tmp/wiki/openwiki-repos"));
    }
}
