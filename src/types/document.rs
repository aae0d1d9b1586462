//! Document graph produced by an ingestion run
//!
//! Field names on the wire follow the completion schema: kinds serialize as
//! `type`, related files as `files`.

use serde::{Deserialize, Serialize};

/// Section kind assigned to the synthesized overview section
pub const OVERVIEW_KIND: &str = "overview";
/// Default section kind when the completion omits one
pub const DEFAULT_SECTION_KIND: &str = "content";
/// Default relation kind when the completion omits one
pub const DEFAULT_RELATION_KIND: &str = "references";
/// Default diagram kind when the completion omits one
pub const DEFAULT_DIAGRAM_KIND: &str = "mermaid";
/// Default nesting level for completion-provided sections
pub const DEFAULT_SECTION_LEVEL: i64 = 2;

/// Title of the overview section (synthesized or fallback)
pub const OVERVIEW_TITLE: &str = "Overview";
/// Summary attached to an overview synthesized from the `overview` field
pub const OVERVIEW_SUMMARY: &str = "High-level introduction to the repository";

/// Structured documentation for one repository
///
/// Always holds at least one section once produced by the response parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentGraph {
    pub overview: String,
    pub sections: Vec<Section>,
    pub relations: Vec<Relation>,
    pub diagrams: Vec<Diagram>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: String,
    pub level: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "files", default)]
    pub related_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl Section {
    /// Level-1 overview section with the given body
    pub fn overview(content: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: OVERVIEW_TITLE.to_string(),
            content: content.into(),
            summary: summary.into(),
            level: 1,
            kind: OVERVIEW_KIND.to_string(),
            related_files: Vec::new(),
        }
    }

    /// URL-friendly anchor derived from the title
    pub fn slug(&self) -> String {
        self.title
            .to_lowercase()
            .replace(' ', "-")
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
            .collect()
    }
}

impl DocumentGraph {
    /// Single-section document carrying the raw completion text verbatim
    pub fn degraded(raw: &str) -> Self {
        Self {
            overview: raw.to_string(),
            sections: vec![Section::overview(raw, "")],
            relations: Vec::new(),
            diagrams: Vec::new(),
        }
    }

    /// Find a section by exact title
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Relations whose endpoints do not name any section title
    pub fn unresolved_relations(&self) -> Vec<&Relation> {
        self.relations
            .iter()
            .filter(|r| self.section(&r.from).is_none() || self.section(&r.to).is_none())
            .collect()
    }

    /// Render the full document as Markdown
    pub fn to_markdown(&self) -> String {
        let mut out = if self.sections.is_empty() {
            self.overview.clone()
        } else {
            self.sections
                .iter()
                .map(|s| {
                    let heading = if s.level == 1 { "#" } else { "##" };
                    format!("{} {}\n\n{}", heading, s.title, s.content)
                })
                .collect::<Vec<_>>()
                .join("\n\n---\n\n")
        };

        if !self.diagrams.is_empty() {
            out.push_str("\n\n---\n\n## Architecture Diagrams\n\n");
            for d in &self.diagrams {
                out.push_str(&format!(
                    "### {}\n\n```{}\n{}\n```\n\n",
                    d.title, d.kind, d.content
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, level: i64) -> Section {
        Section {
            title: title.to_string(),
            content: format!("{} body", title),
            summary: String::new(),
            level,
            kind: DEFAULT_SECTION_KIND.to_string(),
            related_files: vec![],
        }
    }

    #[test]
    fn test_slug() {
        assert_eq!(section("Core Architecture", 2).slug(), "core-architecture");
        assert_eq!(section("API/Interface Contracts", 2).slug(), "apiinterface-contracts");
        assert_eq!(section("Entry Points (v2)", 2).slug(), "entry-points-v2");
    }

    #[test]
    fn test_degraded_graph() {
        let graph = DocumentGraph::degraded("plain text");
        assert_eq!(graph.sections.len(), 1);
        assert_eq!(graph.sections[0].title, OVERVIEW_TITLE);
        assert_eq!(graph.sections[0].content, "plain text");
        assert_eq!(graph.sections[0].level, 1);
        assert_eq!(graph.sections[0].kind, OVERVIEW_KIND);
        assert_eq!(graph.overview, "plain text");
    }

    #[test]
    fn test_to_markdown() {
        let graph = DocumentGraph {
            overview: "o".into(),
            sections: vec![Section::overview("Intro", OVERVIEW_SUMMARY), section("Models", 2)],
            relations: vec![],
            diagrams: vec![Diagram {
                title: "Flow".into(),
                kind: "mermaid".into(),
                content: "graph TD\n A --> B".into(),
            }],
        };

        let md = graph.to_markdown();
        assert!(md.starts_with("# Overview\n\nIntro\n\n---\n\n## Models\n\nModels body"));
        assert!(md.contains("## Architecture Diagrams"));
        assert!(md.contains("### Flow\n\n```mermaid\ngraph TD\n A --> B\n```"));
    }

    #[test]
    fn test_unresolved_relations() {
        let graph = DocumentGraph {
            overview: String::new(),
            sections: vec![section("A", 2), section("B", 2)],
            relations: vec![
                Relation {
                    from: "A".into(),
                    to: "B".into(),
                    kind: "uses".into(),
                    description: None,
                },
                Relation {
                    from: "A".into(),
                    to: "Missing".into(),
                    kind: DEFAULT_RELATION_KIND.into(),
                    description: Some("dangling".into()),
                },
            ],
            diagrams: vec![],
        };

        let unresolved = graph.unresolved_relations();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].to, "Missing");
    }

    #[test]
    fn test_wire_names() {
        let mut s = section("A", 2);
        s.related_files = vec!["src/lib.rs".into()];
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["type"], "content");
        assert_eq!(value["files"][0], "src/lib.rs");
    }
}
