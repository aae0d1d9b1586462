//! Ingest Command
//!
//! Document one remote repository.
//!
//! Usage:
//!   openwiki ingest owner/repo [-f json] [-o wiki.md] [--model M] [--api-base URL]

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::Output;
use crate::config::Config;
use crate::ingest::IngestPipeline;
use crate::types::{DocumentGraph, RepoRef, Result, WikiError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Markdown,
    Json,
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid format '{}'. Valid values: markdown, json",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub repo: String,
    pub format: DocumentFormat,
    pub output: Option<PathBuf>,
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    repository: String,
    generated_at: DateTime<Utc>,
    document: &'a DocumentGraph,
}

/// Render a graph in the requested output format
pub fn render(repo: &RepoRef, graph: &DocumentGraph, format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Markdown => Ok(graph.to_markdown()),
        DocumentFormat::Json => Ok(serde_json::to_string_pretty(&JsonDocument {
            repository: repo.to_string(),
            generated_at: Utc::now(),
            document: graph,
        })?),
    }
}

/// Apply command-line overrides on top of the loaded configuration
pub fn apply_overrides(mut config: Config, options: &IngestOptions) -> Config {
    if let Some(model) = &options.model {
        config.completion.model = model.clone();
    }
    if let Some(api_base) = &options.api_base {
        config.completion.api_base = api_base.clone();
    }
    config
}

pub async fn run(config: Config, options: IngestOptions) -> Result<()> {
    let output = Output::new(options.quiet);
    let repo = RepoRef::parse(&options.repo)?;
    let config = apply_overrides(config, &options);

    if config.completion.api_key.is_none() {
        output.warning("No API key configured; sending unauthenticated requests");
    }
    output.info(&format!("Ingesting {}", repo));

    let pipeline = IngestPipeline::new(config)?;
    let report = match pipeline.process_repository_with_report(&repo).await {
        Ok(report) => report,
        Err(e) => {
            if let WikiError::Fetch(fetch) = &e {
                output.error(&format!("Could not clone {}", repo));
                if !fetch.stderr().is_empty() {
                    eprintln!("{}", fetch.stderr());
                }
            }
            return Err(e);
        }
    };

    output.report(&report);
    let rendered = render(&repo, &report.graph, options.format)?;

    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, rendered).await?;
            output.success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;

    fn graph() -> DocumentGraph {
        DocumentGraph {
            sections: vec![Section::overview("Hello", "Intro")],
            ..DocumentGraph::default()
        }
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("md".parse::<DocumentFormat>(), Ok(DocumentFormat::Markdown));
        assert_eq!("JSON".parse::<DocumentFormat>(), Ok(DocumentFormat::Json));
        assert!("yaml".parse::<DocumentFormat>().is_err());
    }

    #[test]
    fn test_render_json_envelope() {
        let repo = RepoRef::new("octo", "hello").unwrap();
        let text = render(&repo, &graph(), DocumentFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["repository"], "octo/hello");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["document"]["sections"][0]["content"], "Hello");
    }

    #[test]
    fn test_render_markdown() {
        let repo = RepoRef::new("octo", "hello").unwrap();
        let text = render(&repo, &graph(), DocumentFormat::Markdown).unwrap();
        assert!(text.contains("Hello"));
    }

    #[test]
    fn test_apply_overrides() {
        let options = IngestOptions {
            model: Some("other-model".to_string()),
            api_base: Some("https://llm.example.com".to_string()),
            ..IngestOptions::default()
        };
        let config = apply_overrides(Config::default(), &options);
        assert_eq!(config.completion.model, "other-model");
        assert_eq!(config.completion.api_base, "https://llm.example.com");
    }
}
