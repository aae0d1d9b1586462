//! Completion Response Parser
//!
//! Maps the completion's semi-structured output onto a [`DocumentGraph`].
//! Parsing never fails the run: whenever the embedded object is missing,
//! unparseable, or violates the shape of a required field, the whole parse
//! is discarded in favour of a single verbatim overview section.
//!
//! Field handling:
//! - required (`title`/`content`, `from`/`to`, `title`/`content`): must be
//!   strings, otherwise the entire parse falls back
//! - optional: a missing or mistyped value degrades to its default

use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

use super::extract::extract_first_object;
use crate::types::{
    DEFAULT_DIAGRAM_KIND, DEFAULT_RELATION_KIND, DEFAULT_SECTION_KIND, DEFAULT_SECTION_LEVEL,
    Diagram, DocumentGraph, OVERVIEW_SUMMARY, Relation, Section,
};

/// Why structured extraction was abandoned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no JSON object found in completion")]
    NoObject,

    #[error("{array}[{index}] is not an object")]
    NotAnObject { array: &'static str, index: usize },

    #[error("{array}[{index}] is missing required string field '{field}'")]
    MissingField {
        array: &'static str,
        index: usize,
        field: &'static str,
    },
}

/// Parse raw completion text into a document graph, falling back to a
/// degraded single-section document when structured extraction fails
pub fn parse(raw: &str, known_files: &[String]) -> DocumentGraph {
    match parse_structured(raw) {
        Ok(graph) if !graph.sections.is_empty() => {
            log_unknown_files(&graph, known_files);
            graph
        }
        Ok(graph) => {
            warn!("Completion JSON held no overview or sections, using raw text as overview");
            let mut degraded = DocumentGraph::degraded(raw);
            degraded.relations = graph.relations;
            degraded.diagrams = graph.diagrams;
            degraded
        }
        Err(e) => {
            warn!("Failed to parse completion response: {}", e);
            DocumentGraph::degraded(raw)
        }
    }
}

/// Structured extraction without the fallback; sections may come back empty
pub fn parse_structured(raw: &str) -> Result<DocumentGraph, ExtractionError> {
    let obj = extract_first_object(raw).ok_or(ExtractionError::NoObject)?;

    let mut graph = DocumentGraph::default();

    match obj.get("overview") {
        Some(Value::String(overview)) => {
            graph.overview = overview.clone();
            graph
                .sections
                .push(Section::overview(overview.clone(), OVERVIEW_SUMMARY));
        }
        Some(other) => debug!("Ignoring non-string overview: {}", other),
        None => {}
    }

    for (index, item) in array_field(&obj, "sections").iter().enumerate() {
        graph.sections.push(parse_section(item, index)?);
    }

    for (index, item) in array_field(&obj, "relations").iter().enumerate() {
        graph.relations.push(parse_relation(item, index)?);
    }

    for (index, item) in array_field(&obj, "diagrams").iter().enumerate() {
        graph.diagrams.push(parse_diagram(item, index)?);
    }

    debug!(
        "Parsed {} sections, {} relations, {} diagrams",
        graph.sections.len(),
        graph.relations.len(),
        graph.diagrams.len()
    );

    Ok(graph)
}

// =============================================================================
// Element Parsers
// =============================================================================

fn parse_section(item: &Value, index: usize) -> Result<Section, ExtractionError> {
    let obj = as_object(item, "sections", index)?;

    Ok(Section {
        title: required_str(obj, "sections", index, "title")?,
        content: required_str(obj, "sections", index, "content")?,
        summary: optional_str(obj, "summary").unwrap_or_default(),
        level: obj
            .get("level")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_SECTION_LEVEL),
        kind: optional_str(obj, "type").unwrap_or_else(|| DEFAULT_SECTION_KIND.to_string()),
        related_files: obj
            .get("files")
            .and_then(Value::as_array)
            .map(|files| {
                files
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn parse_relation(item: &Value, index: usize) -> Result<Relation, ExtractionError> {
    let obj = as_object(item, "relations", index)?;

    Ok(Relation {
        from: required_str(obj, "relations", index, "from")?,
        to: required_str(obj, "relations", index, "to")?,
        kind: optional_str(obj, "type").unwrap_or_else(|| DEFAULT_RELATION_KIND.to_string()),
        description: optional_str(obj, "description"),
    })
}

fn parse_diagram(item: &Value, index: usize) -> Result<Diagram, ExtractionError> {
    let obj = as_object(item, "diagrams", index)?;

    Ok(Diagram {
        title: required_str(obj, "diagrams", index, "title")?,
        kind: optional_str(obj, "type").unwrap_or_else(|| DEFAULT_DIAGRAM_KIND.to_string()),
        content: required_str(obj, "diagrams", index, "content")?,
    })
}

// =============================================================================
// Field Helpers
// =============================================================================

/// Array member by key; a mistyped member is treated as absent
fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    match obj.get(key) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Ignoring non-array '{}' member: {}", key, other);
            &[]
        }
        None => &[],
    }
}

fn as_object<'a>(
    item: &'a Value,
    array: &'static str,
    index: usize,
) -> Result<&'a Map<String, Value>, ExtractionError> {
    item.as_object()
        .ok_or(ExtractionError::NotAnObject { array, index })
}

fn required_str(
    obj: &Map<String, Value>,
    array: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String, ExtractionError> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or(ExtractionError::MissingField {
            array,
            index,
            field,
        })
}

fn optional_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

fn log_unknown_files(graph: &DocumentGraph, known_files: &[String]) {
    let known: HashSet<&str> = known_files.iter().map(String::as_str).collect();
    let unknown = graph
        .sections
        .iter()
        .flat_map(|s| s.related_files.iter())
        .filter(|f| !known.contains(f.as_str()))
        .count();

    if unknown > 0 {
        debug!(
            "{} related file reference(s) name files outside the selected set",
            unknown
        );
    }
}
