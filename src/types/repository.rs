//! Repository identity
//!
//! Parses the `owner/repo` pair that names an ingestion target and renders
//! the canonical clone URL for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use super::error::{Result, WikiError};

/// Owner/name pair identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Build from already-split parts, validating each segment
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        let input = format!("{}/{}", owner, name);

        validate_segment(&owner).map_err(|reason| WikiError::invalid_repository(&input, reason))?;
        validate_segment(&name).map_err(|reason| WikiError::invalid_repository(&input, reason))?;

        Ok(Self { owner, name })
    }

    /// Parse `owner/repo`, `owner/repo.git`, or `https://host/owner/repo[.git]`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        let path = if trimmed.contains("://") {
            let url = Url::parse(trimmed)
                .map_err(|e| WikiError::invalid_repository(input, e.to_string()))?;
            url.path().trim_matches('/').to_string()
        } else {
            trimmed.trim_matches('/').to_string()
        };

        let mut parts = path.split('/');
        let (Some(owner), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(WikiError::invalid_repository(
                input,
                "expected exactly two path segments (owner/repo)",
            ));
        };

        let name = name.strip_suffix(".git").unwrap_or(name);
        Self::new(owner, name)
            .map_err(|e| match e {
                WikiError::InvalidRepository { reason, .. } => {
                    WikiError::invalid_repository(input, reason)
                }
                other => other,
            })
    }

    /// Canonical HTTPS clone URL on the given host
    pub fn clone_url(&self, host: &str) -> String {
        format!("https://{}/{}/{}.git", host, self.owner, self.name)
    }
}

/// Segments become subprocess arguments and directory names, so only a
/// conservative character set is accepted and no leading `-`.
fn validate_segment(segment: &str) -> std::result::Result<(), String> {
    if segment.is_empty() {
        return Err("owner and repository name must be non-empty".to_string());
    }
    if segment.starts_with('-') {
        return Err(format!("segment '{}' may not start with '-'", segment));
    }
    if segment == "." || segment == ".." {
        return Err(format!("segment '{}' is not a valid name", segment));
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(format!("segment '{}' contains invalid character '{}'", segment, bad));
    }
    Ok(())
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_form() {
        let repo = RepoRef::parse("rust-lang/cargo").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "cargo");
        assert_eq!(repo.to_string(), "rust-lang/cargo");
    }

    #[test]
    fn test_parse_url_forms() {
        let repo = RepoRef::parse("https://github.com/tokio-rs/tokio.git").unwrap();
        assert_eq!(repo, RepoRef::new("tokio-rs", "tokio").unwrap());

        let repo = RepoRef::parse("https://github.com/serde-rs/json/").unwrap();
        assert_eq!(repo.name, "json");
    }

    #[test]
    fn test_clone_url() {
        let repo = RepoRef::parse("octo/hello.world").unwrap();
        assert_eq!(
            repo.clone_url("github.com"),
            "https://github.com/octo/hello.world.git"
        );
    }

    #[test]
    fn test_rejects_invalid_identities() {
        assert!(RepoRef::parse("just-one").is_err());
        assert!(RepoRef::parse("a/b/c").is_err());
        assert!(RepoRef::parse("owner/").is_err());
        assert!(RepoRef::parse("--upload-pack=x/repo").is_err());
        assert!(RepoRef::parse("owner/re po").is_err());
        assert!(RepoRef::parse("../etc").is_err());

        let err = RepoRef::parse("owner/re$po").unwrap_err();
        assert!(matches!(err, WikiError::InvalidRepository { ref input, .. } if input == "owner/re$po"));
    }
}
