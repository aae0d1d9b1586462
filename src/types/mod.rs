pub mod document;
pub mod error;
pub mod repository;

pub use document::{
    DEFAULT_DIAGRAM_KIND, DEFAULT_RELATION_KIND, DEFAULT_SECTION_KIND, DEFAULT_SECTION_LEVEL,
    Diagram, DocumentGraph, OVERVIEW_KIND, OVERVIEW_SUMMARY, OVERVIEW_TITLE, Relation, Section,
};
pub use error::{CompletionError, FetchError, Result, WikiError};
pub use repository::RepoRef;

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;

/// Unique token namespacing one ingestion run's workspace
///
/// Prevents accidental mixing of run tokens with other string types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunToken(String);

impl RunToken {
    /// Fresh random token (hyphen-free UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tokens_are_unique() {
        let a = RunToken::generate();
        let b = RunToken::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
