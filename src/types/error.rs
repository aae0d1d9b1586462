//! Unified Error Type System
//!
//! Centralized error types for the ingestion pipeline.
//!
//! ## Propagation Policy
//!
//! Only two stage failures are fatal to an ingestion run:
//!
//! - **Fetch**: the version-control subprocess failed (carries captured stderr)
//! - **Completion**: the completion endpoint failed or returned no content
//!
//! Everything else (unreadable files, malformed completion output, cleanup
//! failures) is absorbed by the stage that hit it and never reaches the caller.

use thiserror::Error;

// =============================================================================
// Fetch Error
// =============================================================================

/// Repository snapshot could not be obtained
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Clone subprocess ran and exited unsuccessfully
    #[error("git clone failed (exit status {}): {stderr}", display_status(.status))]
    NonZeroExit {
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        /// Captured standard error of the subprocess
        stderr: String,
    },

    /// Clone subprocess could not be launched at all
    #[error("failed to launch {program}: {message}")]
    Spawn { program: String, message: String },
}

fn display_status(status: &Option<i32>) -> String {
    status.map_or_else(|| "signal".to_string(), |code| code.to_string())
}

impl FetchError {
    /// Text reported by the failing tool
    pub fn stderr(&self) -> &str {
        match self {
            Self::NonZeroExit { stderr, .. } => stderr,
            Self::Spawn { message, .. } => message,
        }
    }
}

// =============================================================================
// Completion Error
// =============================================================================

/// Completion endpoint round trip failed
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// Request never produced an HTTP response (DNS, connect, timeout)
    #[error("completion request failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status
    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status, but the body was not a chat-completion document
    #[error("completion response could not be decoded: {0}")]
    MalformedBody(String),

    /// Success status, but the first choice carried no content
    #[error("completion returned empty content")]
    EmptyContent,
}

impl CompletionError {
    /// Whether the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum WikiError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Fatal Stage Errors
    // -------------------------------------------------------------------------
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid repository '{input}': {reason}")]
    InvalidRepository { input: String, reason: String },

    /// Blocking stage task panicked or was cancelled
    #[error("Pipeline task failed in {stage}: {message}")]
    Task { stage: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, WikiError>;

impl WikiError {
    pub fn invalid_repository(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRepository {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from one of the two fatal pipeline stages
    pub fn is_stage_failure(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Completion(_))
    }
}

// =============================================================================
// Tests
// =============================================================================
