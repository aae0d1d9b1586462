//! Embedded JSON extraction
//!
//! Completions may wrap the requested object in prose or markdown fences.
//! A bracket-depth scanner walks the text from a `{`, tracking string
//! literals and escapes, to find where that brace closes. A brace that never
//! closes (prose like "blocks open with `{`", or a stray quote swallowing the
//! rest of the text) is skipped and scanning resumes at the next `{`.

use serde_json::{Map, Value};
use tracing::debug;

/// Iterator over balanced top-level `{...}` spans of a text
pub struct ObjectSpans<'a> {
    text: &'a str,
    pos: usize,
}

/// Balanced top-level brace spans, in order of appearance
pub fn object_spans(text: &str) -> ObjectSpans<'_> {
    ObjectSpans { text, pos: 0 }
}

impl<'a> Iterator for ObjectSpans<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.text[self.pos..].find('{') {
            let start = self.pos + offset;
            match balanced_end(self.text, start) {
                Some(end) => {
                    self.pos = end;
                    return Some(&self.text[start..end]);
                }
                None => self.pos = start + 1,
            }
        }
        self.pos = self.text.len();
        None
    }
}

/// Byte offset just past the `}` closing the `{` at `start`
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in text[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// First JSON object in the text, trying every `{` in order of appearance.
/// A balanced span that is not JSON is searched for nested candidates.
pub fn extract_first_object(text: &str) -> Option<Map<String, Value>> {
    let mut pos = 0;
    while let Some(offset) = text[pos..].find('{') {
        let start = pos + offset;
        if let Some(end) = balanced_end(text, start) {
            match serde_json::from_str::<Value>(&text[start..end]) {
                Ok(Value::Object(map)) => return Some(map),
                Ok(_) => {}
                Err(e) => debug!("Skipping brace span that is not JSON: {}", e),
            }
        }
        pos = start + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_in_prose() {
        let text = r#"Here you go: {"a": 1} and also {"b": {"c": 2}} done"#;
        let spans: Vec<_> = object_spans(text).collect();
        assert_eq!(spans, vec![r#"{"a": 1}"#, r#"{"b": {"c": 2}}"#]);
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"{"content": "fn main() { println!(\"}\"); }", "n": 1}"#;
        let spans: Vec<_> = object_spans(text).collect();
        assert_eq!(spans, vec![text]);
        let obj = extract_first_object(text).unwrap();
        assert_eq!(obj["n"], 1);
    }

    #[test]
    fn test_code_fence_wrapping() {
        let text = "```json\n{\"overview\": \"X\"}\n```";
        let obj = extract_first_object(text).unwrap();
        assert_eq!(obj["overview"], "X");
    }

    #[test]
    fn test_skips_non_json_span() {
        let text = r#"Use {placeholders} like this: {"overview": "real"}"#;
        let obj = extract_first_object(text).unwrap();
        assert_eq!(obj["overview"], "real");
    }

    #[test]
    fn test_unbalanced_yields_nothing() {
        assert!(extract_first_object(r#"{"overview": "cut off"#).is_none());
        assert!(extract_first_object("no braces at all").is_none());
        assert_eq!(object_spans("{ never closed").count(), 0);
    }

    #[test]
    fn test_unclosed_brace_resumes_at_next_brace() {
        let spans: Vec<_> = object_spans("{ { }").collect();
        assert_eq!(spans, vec!["{ }"]);

        let text = "Blocks open with `{` in this language.\n```json\n{\"overview\":\"X\",\"sections\":[{\"title\":\"A\",\"content\":\"B\"}]}\n```";
        let obj = extract_first_object(text).unwrap();
        assert_eq!(obj["overview"], "X");
        assert_eq!(obj["sections"][0]["title"], "A");
    }

    #[test]
    fn test_stray_quote_does_not_hide_later_object() {
        let text = r#"Template {name"s} then {"overview":"X"}"#;
        let obj = extract_first_object(text).unwrap();
        assert_eq!(obj["overview"], "X");
    }

    #[test]
    fn test_nested_object_inside_prose_braces() {
        let text = r#"Result { see {"overview": "inner"} }"#;
        assert_eq!(extract_first_object(text).unwrap()["overview"], "inner");
    }

    #[test]
    fn test_quotes_in_prose_before_object() {
        let text = r#"He said "hi" then: {"k": "v"}"#;
        assert_eq!(extract_first_object(text).unwrap()["k"], "v");
    }
}
