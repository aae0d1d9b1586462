//! Context Assembler
//!
//! Renders the selected files into the user message:
//!
//! ```text
//! REPOSITORY: owner/repo
//! CODE FILES:
//!
//! ### src/main.rs
//! ```
//! <content>
//! ```
//! ```

use std::fmt::Write;

use super::selector::SelectedFile;
use crate::constants::context::MAX_FILES;
use crate::types::RepoRef;

pub fn assemble(repo: &RepoRef, files: &[SelectedFile]) -> String {
    let capacity = files
        .iter()
        .take(MAX_FILES)
        .map(|f| f.content.len() + f.path.len() + 16)
        .sum::<usize>()
        + 64;
    let mut out = String::with_capacity(capacity);

    let _ = writeln!(out, "REPOSITORY: {}", repo);
    out.push_str("CODE FILES:\n");

    for file in files.iter().take(MAX_FILES) {
        let _ = write!(out, "\n### {}\n```\n{}\n```\n", file.path, file.content);
    }

    out
}
